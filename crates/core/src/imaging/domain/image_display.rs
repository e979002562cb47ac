use crate::shared::frame::Frame;

/// Presents an annotated frame to the user.
///
/// Implementations decide whether showing blocks; the pipeline only
/// guarantees that frames arrive in processing order.
pub trait ImageDisplay: Send {
    fn show(&mut self, frame: &Frame, title: &str) -> Result<(), Box<dyn std::error::Error>>;
}

/// Display that discards every frame.
///
/// Used for headless runs and by tests where the image itself is irrelevant.
pub struct NullDisplay;

impl ImageDisplay for NullDisplay {
    fn show(&mut self, _frame: &Frame, title: &str) -> Result<(), Box<dyn std::error::Error>> {
        log::debug!("Display disabled, skipping {title}");
        Ok(())
    }
}
