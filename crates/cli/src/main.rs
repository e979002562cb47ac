use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::Parser;

use facevote_core::annotation::infrastructure::caption_box_annotator::CaptionBoxAnnotator;
use facevote_core::detection::domain::face_encoder::FaceEncoder;
use facevote_core::detection::domain::face_vision::FaceVision;
use facevote_core::detection::infrastructure::histogram_face_encoder::HistogramFaceEncoder;
use facevote_core::detection::infrastructure::onnx_arcface_encoder::OnnxArcfaceEncoder;
use facevote_core::detection::infrastructure::onnx_ultraface_localizer::{
    OnnxUltrafaceLocalizer, DEFAULT_CONFIDENCE,
};
use facevote_core::detection::infrastructure::threshold_matcher::{MatchMetric, ThresholdMatcher};
use facevote_core::imaging::domain::image_display::{ImageDisplay, NullDisplay};
use facevote_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use facevote_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use facevote_core::imaging::infrastructure::viewer_display::ViewerDisplay;
use facevote_core::pipeline::build_reference_set_use_case::BuildReferenceSetUseCase;
use facevote_core::pipeline::pipeline_logger::{PipelineLogger, StdoutPipelineLogger};
use facevote_core::pipeline::recognize_image_use_case::RecognizeImageUseCase;
use facevote_core::pipeline::validate_directory_use_case::{
    ImageCallback, ValidateDirectoryUseCase,
};
use facevote_core::recognition::recognized_face::RecognizedFace;
use facevote_core::shared::constants::{
    ARCFACE_COSINE_THRESHOLD, DEFAULT_TRAINING_DIR, DEFAULT_VALIDATION_DIR, EUCLIDEAN_TOLERANCE,
    FALLBACK_VALIDATION_DIR, HISTOGRAM_COSINE_THRESHOLD, UNKNOWN_LABEL,
};
use facevote_core::shared::model_resolver::{self, ModelSpec, ARCFACE, ULTRAFACE};

/// Labeled face recognition: learn faces from a training tree, then label
/// every face found in a validation directory.
#[derive(Parser, Debug)]
#[command(name = "facevote")]
struct Cli {
    /// Training root: one subdirectory per person, images directly inside.
    #[arg(long, default_value = DEFAULT_TRAINING_DIR)]
    training: PathBuf,

    /// Directory searched recursively for images to recognize
    /// [default: input, or validacao when input is absent].
    #[arg(long)]
    validation: Option<PathBuf>,

    /// Face encoder: arcface or histogram.
    #[arg(long, default_value = "arcface")]
    encoder: String,

    /// Match predicate: cosine or euclidean.
    #[arg(long, default_value = "cosine")]
    metric: String,

    /// Match threshold (cosine: minimum similarity, euclidean: maximum distance).
    #[arg(long)]
    tolerance: Option<f64>,

    /// Face localization confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Label drawn on faces that match nobody.
    #[arg(long, default_value = UNKNOWN_LABEL)]
    unknown_label: String,

    /// Do not open annotated images in the system viewer.
    #[arg(long)]
    no_display: bool,

    /// Print one JSON object per validation image to stdout.
    #[arg(long)]
    json: bool,

    /// Log and skip validation files that fail instead of aborting.
    #[arg(long)]
    keep_going: bool,

    /// Directory checked for model files before the cache and download.
    #[arg(long)]
    models_dir: Option<PathBuf>,
}

impl Cli {
    fn match_metric(&self) -> MatchMetric {
        match self.metric.as_str() {
            "euclidean" => MatchMetric::Euclidean {
                tolerance: self.tolerance.unwrap_or(EUCLIDEAN_TOLERANCE),
            },
            _ => {
                let default = if self.encoder == "histogram" {
                    HISTOGRAM_COSINE_THRESHOLD
                } else {
                    ARCFACE_COSINE_THRESHOLD
                };
                MatchMetric::Cosine {
                    threshold: self.tolerance.unwrap_or(default),
                }
            }
        }
    }

    fn validation_dir(&self) -> PathBuf {
        if let Some(dir) = &self.validation {
            return dir.clone();
        }
        let primary = Path::new(DEFAULT_VALIDATION_DIR);
        let fallback = Path::new(FALLBACK_VALIDATION_DIR);
        if !primary.exists() && fallback.is_dir() {
            log::warn!(
                "{} not found, validating {} instead",
                primary.display(),
                fallback.display()
            );
            return fallback.to_path_buf();
        }
        primary.to_path_buf()
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let start = Instant::now();
    log::info!("Starting facevote");

    let mut vision = build_vision(&cli)?;
    let mut logger = StdoutPipelineLogger::default();

    let reference = BuildReferenceSetUseCase::new(Box::new(ImageFileReader::new())).execute(
        &cli.training,
        &mut vision,
        &mut logger,
    )?;
    if reference.is_empty() {
        log::warn!(
            "No faces found under {}; every face will be labeled {}",
            cli.training.display(),
            cli.unknown_label
        );
    }

    let display: Box<dyn ImageDisplay> = if cli.no_display {
        Box::new(NullDisplay)
    } else {
        Box::new(ViewerDisplay::new(Box::new(ImageFileWriter::new())))
    };
    let recognizer = RecognizeImageUseCase::new(
        Box::new(ImageFileReader::new()),
        Box::new(CaptionBoxAnnotator::default()),
        display,
        cli.unknown_label.as_str(),
    );
    let on_image: Option<ImageCallback> = if cli.json {
        Some(Box::new(print_json))
    } else {
        None
    };

    let mut validate_uc = ValidateDirectoryUseCase::new(recognizer, cli.keep_going, on_image);
    let report = validate_uc.execute(&cli.validation_dir(), &mut vision, &reference, &mut logger)?;

    logger.summary();
    for (path, reason) in &report.failures {
        log::warn!("Failed: {} ({reason})", path.display());
    }
    log::info!(
        "Finished (total execution time: {:.3}s)",
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn build_vision(cli: &Cli) -> Result<FaceVision, Box<dyn std::error::Error>> {
    let bundled = cli.models_dir.as_deref();

    let localizer_path = resolve_model(ULTRAFACE, bundled)?;
    let localizer = OnnxUltrafaceLocalizer::new(&localizer_path, cli.confidence)?;

    let encoder: Box<dyn FaceEncoder> = if cli.encoder == "histogram" {
        Box::new(HistogramFaceEncoder::new())
    } else {
        let encoder_path = resolve_model(ARCFACE, bundled)?;
        Box::new(OnnxArcfaceEncoder::new(&encoder_path)?)
    };

    let metric = cli.match_metric();
    log::info!("Encoder: {}, match metric: {metric:?}", cli.encoder);

    Ok(FaceVision::new(
        Box::new(localizer),
        encoder,
        Box::new(ThresholdMatcher::new(metric)),
    ))
}

fn resolve_model(
    spec: ModelSpec,
    bundled: Option<&Path>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {}", spec.file_name);
    let path = model_resolver::resolve(spec, bundled, Some(Box::new(download_progress)))?;
    Ok(path)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.encoder != "arcface" && cli.encoder != "histogram" {
        return Err(format!(
            "Encoder must be 'arcface' or 'histogram', got '{}'",
            cli.encoder
        )
        .into());
    }
    if cli.metric != "cosine" && cli.metric != "euclidean" {
        return Err(format!(
            "Metric must be 'cosine' or 'euclidean', got '{}'",
            cli.metric
        )
        .into());
    }
    if let Some(t) = cli.tolerance {
        if cli.metric == "cosine" && !(-1.0..=1.0).contains(&t) {
            return Err(format!("Cosine tolerance must be between -1.0 and 1.0, got {t}").into());
        }
        if cli.metric == "euclidean" && t < 0.0 {
            return Err(format!("Euclidean tolerance must be non-negative, got {t}").into());
        }
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if cli.unknown_label.is_empty() {
        return Err("Unknown label must not be empty".into());
    }
    if let Some(dir) = &cli.models_dir {
        if !dir.is_dir() {
            return Err(format!("Models directory not found: {}", dir.display()).into());
        }
    }
    Ok(())
}

fn print_json(path: &Path, faces: &[RecognizedFace]) {
    let line = serde_json::json!({
        "path": path.display().to_string(),
        "faces": faces,
    });
    println!("{line}");
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading model... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading model... {downloaded} bytes");
    }
}
