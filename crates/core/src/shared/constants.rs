pub const ULTRAFACE_MODEL_NAME: &str = "version-RFB-320.onnx";
pub const ULTRAFACE_MODEL_URL: &str =
    "https://github.com/onnx/models/raw/main/validated/vision/body_analysis/ultraface/models/version-RFB-320.onnx";

pub const ARCFACE_MODEL_NAME: &str = "arcfaceresnet100-11-int8.onnx";
pub const ARCFACE_MODEL_URL: &str =
    "https://github.com/onnx/models/raw/main/validated/vision/body_analysis/arcface/model/arcfaceresnet100-11-int8.onnx";

/// Training root used by the entry point.
pub const DEFAULT_TRAINING_DIR: &str = "treinamento";
/// Validation root used by the entry point.
pub const DEFAULT_VALIDATION_DIR: &str = "input";
/// Validation root used when a caller asks for the library default.
pub const FALLBACK_VALIDATION_DIR: &str = "validacao";

/// Label given to faces that match nothing in the reference set.
pub const UNKNOWN_LABEL: &str = "Desconhecido";

pub const BOX_COLOR: [u8; 3] = [0, 255, 0];
pub const TEXT_COLOR: [u8; 3] = [255, 255, 255];

/// Cosine threshold for L2-normalized ArcFace encodings.
pub const ARCFACE_COSINE_THRESHOLD: f64 = 0.4;
/// Cosine threshold for hue/saturation histogram encodings.
pub const HISTOGRAM_COSINE_THRESHOLD: f64 = 0.9;
/// Euclidean tolerance, same default as dlib-style 128-d encoders.
pub const EUCLIDEAN_TOLERANCE: f64 = 0.6;
