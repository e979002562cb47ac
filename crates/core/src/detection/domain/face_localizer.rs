use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Domain interface for finding faces in an image.
///
/// Returns zero or more boxes; an image without faces is not an error.
pub trait FaceLocalizer: Send {
    fn localize(&mut self, frame: &Frame) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>>;
}
