use std::path::Path;
use std::time::Instant;

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::detection::domain::face_vision::FaceVision;
use crate::imaging::domain::image_display::ImageDisplay;
use crate::imaging::domain::image_reader::ImageReader;
use crate::pipeline::pipeline_logger::{metric, stage, PipelineLogger};
use crate::recognition::recognized_face::RecognizedFace;
use crate::recognition::reference_set::ReferenceSet;
use crate::recognition::vote_classifier::VoteClassifier;

/// Single-image recognition: read → localize → encode → classify → annotate → display.
pub struct RecognizeImageUseCase {
    reader: Box<dyn ImageReader>,
    annotator: Box<dyn FrameAnnotator>,
    display: Box<dyn ImageDisplay>,
    unknown_label: String,
}

impl RecognizeImageUseCase {
    pub fn new(
        reader: Box<dyn ImageReader>,
        annotator: Box<dyn FrameAnnotator>,
        display: Box<dyn ImageDisplay>,
        unknown_label: impl Into<String>,
    ) -> Self {
        Self {
            reader,
            annotator,
            display,
            unknown_label: unknown_label.into(),
        }
    }

    pub fn unknown_label(&self) -> &str {
        &self.unknown_label
    }

    /// Recognizes every face in the image at `path` and shows the annotated result.
    ///
    /// Faces no reference entry matches get the unknown label with zero votes.
    pub fn execute(
        &mut self,
        path: &Path,
        vision: &mut FaceVision,
        reference: &ReferenceSet,
        logger: &mut dyn PipelineLogger,
    ) -> Result<Vec<RecognizedFace>, Box<dyn std::error::Error>> {
        let t = Instant::now();
        let mut frame = self.reader.read(path)?;
        logger.timing(stage::DECODE, elapsed_ms(t));

        let t = Instant::now();
        let boxes = vision.localize(&frame)?;
        logger.timing(stage::LOCALIZE, elapsed_ms(t));

        let t = Instant::now();
        let encodings = vision.encode(&frame, &boxes)?;
        logger.timing(stage::ENCODE, elapsed_ms(t));

        let t = Instant::now();
        let classifier = VoteClassifier::new(reference, vision.matcher());
        let mut faces = Vec::with_capacity(boxes.len());
        for (bbox, encoding) in boxes.into_iter().zip(&encodings) {
            let face = match classifier.classify(encoding)? {
                Some(c) => RecognizedFace {
                    bbox,
                    label: c.label,
                    votes: c.votes,
                },
                None => RecognizedFace {
                    bbox,
                    label: self.unknown_label.clone(),
                    votes: 0,
                },
            };
            faces.push(face);
        }
        logger.timing(stage::CLASSIFY, elapsed_ms(t));

        let unknown = faces.iter().filter(|f| !f.is_known()).count();
        logger.metric(metric::FACES_PER_IMAGE, faces.len() as f64);
        logger.metric(metric::UNKNOWN_FACES, unknown as f64);
        for face in &faces {
            log::debug!(
                "{}: {} ({} votes) at {:?}",
                path.display(),
                face.label,
                face.votes,
                face.bbox
            );
        }

        let t = Instant::now();
        self.annotator.annotate(&mut frame, &faces)?;
        logger.timing(stage::ANNOTATE, elapsed_ms(t));

        let t = Instant::now();
        self.display.show(&frame, &path.display().to_string())?;
        logger.timing(stage::DISPLAY, elapsed_ms(t));

        Ok(faces)
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
