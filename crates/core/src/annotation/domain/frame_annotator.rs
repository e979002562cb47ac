use crate::recognition::recognized_face::RecognizedFace;
use crate::shared::frame::Frame;

/// Domain interface for marking recognized faces on an image.
///
/// Implementations modify the frame in-place (`&mut Frame`).
pub trait FrameAnnotator: Send {
    fn annotate(
        &self,
        frame: &mut Frame,
        faces: &[RecognizedFace],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
