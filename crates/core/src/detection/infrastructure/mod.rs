pub mod histogram_face_encoder;
pub mod math;
pub mod onnx_arcface_encoder;
pub mod onnx_session;
pub mod onnx_ultraface_localizer;
pub mod threshold_matcher;
