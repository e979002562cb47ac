use crate::detection::domain::encoding::Encoding;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Domain interface for turning located faces into encodings.
///
/// Must return one encoding per box, in the same order.
pub trait FaceEncoder: Send {
    fn encode(
        &mut self,
        frame: &Frame,
        boxes: &[BoundingBox],
    ) -> Result<Vec<Encoding>, Box<dyn std::error::Error>>;
}
