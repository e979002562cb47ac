use std::path::Path;
use std::time::Instant;

use crate::detection::domain::face_vision::FaceVision;
use crate::imaging::domain::image_reader::ImageReader;
use crate::pipeline::dataset_walker::{label_entries, DatasetError};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::recognition::reference_set::ReferenceSet;

pub const PHASE: &str = "training";

/// Training pass: `root/<label>/<image>` → reference set of (label, encoding).
///
/// Every face found in a training image is stored under the image's label.
/// Images with no face contribute nothing.
pub struct BuildReferenceSetUseCase {
    reader: Box<dyn ImageReader>,
}

impl BuildReferenceSetUseCase {
    pub fn new(reader: Box<dyn ImageReader>) -> Self {
        Self { reader }
    }

    pub fn execute(
        &self,
        root: &Path,
        vision: &mut FaceVision,
        logger: &mut dyn PipelineLogger,
    ) -> Result<ReferenceSet, Box<dyn std::error::Error>> {
        logger.phase_started(PHASE);
        let start = Instant::now();

        let entries = label_entries(root)?;
        let total: usize = entries.iter().map(|e| e.images.len()).sum();
        let mut reference = ReferenceSet::new();
        let mut current = 0;

        for entry in &entries {
            for path in &entry.images {
                current += 1;
                let frame = self.reader.read(path).map_err(|e| DatasetError::Unreadable {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                let faces = vision.detect(&frame)?;
                if faces.is_empty() {
                    log::debug!("No face found in {}, skipping", path.display());
                }
                for face in faces {
                    reference.push(entry.label.as_str(), face.encoding);
                }
                logger.progress(current, total);
            }
        }

        logger.info(&format!(
            "Reference set: {} encodings across {} labels",
            reference.len(),
            reference.distinct_labels().len()
        ));
        logger.phase_finished(PHASE, start.elapsed());
        Ok(reference)
    }
}
