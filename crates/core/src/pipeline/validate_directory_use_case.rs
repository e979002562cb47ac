use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::detection::domain::face_vision::FaceVision;
use crate::pipeline::dataset_walker::files_recursive;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::recognize_image_use_case::RecognizeImageUseCase;
use crate::recognition::recognized_face::RecognizedFace;
use crate::recognition::reference_set::ReferenceSet;

pub const PHASE: &str = "validation";

/// Called after each successfully recognized image.
pub type ImageCallback = Box<dyn FnMut(&Path, &[RecognizedFace]) + Send>;

/// Totals for one validation run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    pub images: usize,
    pub faces: usize,
    pub unknown: usize,
    /// Files skipped under `keep_going`, with the error message.
    pub failures: Vec<(PathBuf, String)>,
}

/// Runs recognition on every regular file below a directory, in path order.
///
/// No extension filter is applied: a file the reader cannot decode aborts the
/// run unless `keep_going` is set, in which case it is logged and recorded.
pub struct ValidateDirectoryUseCase {
    recognizer: RecognizeImageUseCase,
    keep_going: bool,
    on_image: Option<ImageCallback>,
}

impl ValidateDirectoryUseCase {
    pub fn new(
        recognizer: RecognizeImageUseCase,
        keep_going: bool,
        on_image: Option<ImageCallback>,
    ) -> Self {
        Self {
            recognizer,
            keep_going,
            on_image,
        }
    }

    pub fn execute(
        &mut self,
        root: &Path,
        vision: &mut FaceVision,
        reference: &ReferenceSet,
        logger: &mut dyn PipelineLogger,
    ) -> Result<ValidationReport, Box<dyn std::error::Error>> {
        logger.phase_started(PHASE);
        let start = Instant::now();

        let files = files_recursive(root)?;
        let total = files.len();
        let mut report = ValidationReport::default();

        for (i, path) in files.iter().enumerate() {
            match self.recognizer.execute(path, vision, reference, logger) {
                Ok(faces) => {
                    report.images += 1;
                    report.faces += faces.len();
                    report.unknown += faces.iter().filter(|f| !f.is_known()).count();
                    if let Some(ref mut cb) = self.on_image {
                        cb(path, &faces);
                    }
                }
                Err(e) if self.keep_going => {
                    log::warn!("Skipping {}: {e}", path.display());
                    report.failures.push((path.clone(), e.to_string()));
                }
                Err(e) => return Err(e),
            }
            logger.progress(i + 1, total);
        }

        logger.info(&format!(
            "Validated {} images: {} faces, {} unknown, {} failed",
            report.images,
            report.faces,
            report.unknown,
            report.failures.len()
        ));
        logger.phase_finished(PHASE, start.elapsed());
        Ok(report)
    }
}
