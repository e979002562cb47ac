use std::path::Path;

use tempfile::TempPath;

use crate::imaging::domain::image_display::ImageDisplay;
use crate::imaging::domain::image_writer::ImageWriter;
use crate::shared::frame::Frame;

/// Opener callback; receives the path of the PNG to show.
pub type OpenFn = Box<dyn Fn(&Path) -> std::io::Result<()> + Send>;

/// Shows frames in the system image viewer.
///
/// Each frame is written to its own temporary PNG which stays on disk while
/// the display is alive, so the viewer can load it after this call returns.
/// The files are removed when the display is dropped. Opening is non-blocking.
pub struct ViewerDisplay {
    writer: Box<dyn ImageWriter>,
    opener: OpenFn,
    shown: Vec<TempPath>,
}

impl ViewerDisplay {
    pub fn new(writer: Box<dyn ImageWriter>) -> Self {
        Self::with_opener(writer, Box::new(|path: &Path| open::that_detached(path)))
    }

    pub fn with_opener(writer: Box<dyn ImageWriter>, opener: OpenFn) -> Self {
        Self {
            writer,
            opener,
            shown: Vec::new(),
        }
    }

    /// Temporary files handed to the viewer so far.
    pub fn shown(&self) -> Vec<&Path> {
        self.shown.iter().map(|p| &**p).collect()
    }
}

impl ImageDisplay for ViewerDisplay {
    fn show(&mut self, frame: &Frame, title: &str) -> Result<(), Box<dyn std::error::Error>> {
        let temp = tempfile::Builder::new()
            .prefix(&format!("facevote-{}-", file_stem(title)))
            .suffix(".png")
            .tempfile()?;
        let path = temp.into_temp_path();

        self.writer.write(&*path, frame)?;
        (self.opener)(&*path).map_err(|e| format!("Failed to open viewer for {title}: {e}"))?;
        log::debug!("Opened {} for {title}", path.display());
        self.shown.push(path);
        Ok(())
    }
}

/// Reduces a title to characters safe in a file name.
fn file_stem(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(40)
        .collect();
    if stem.is_empty() {
        "image".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::infrastructure::image_file_writer::ImageFileWriter;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    fn recording_opener() -> (OpenFn, Arc<Mutex<Vec<PathBuf>>>) {
        let opened = Arc::new(Mutex::new(Vec::new()));
        let sink = opened.clone();
        let opener: OpenFn = Box::new(move |path: &Path| {
            sink.lock().unwrap().push(path.to_path_buf());
            Ok(())
        });
        (opener, opened)
    }

    #[test]
    fn test_show_writes_png_and_opens_it() {
        let (opener, opened) = recording_opener();
        let mut display = ViewerDisplay::with_opener(Box::new(ImageFileWriter::new()), opener);

        display
            .show(&Frame::filled(12, 10, [0, 255, 0]), "group photo.jpg")
            .unwrap();

        let opened = opened.lock().unwrap();
        assert_eq!(opened.len(), 1);
        assert_eq!(display.shown(), vec![opened[0].as_path()]);
        let img = image::open(&opened[0]).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (12, 10));
    }

    #[test]
    fn test_dropping_display_removes_temporary_files() {
        let (opener, opened) = recording_opener();
        let mut display = ViewerDisplay::with_opener(Box::new(ImageFileWriter::new()), opener);
        display
            .show(&Frame::filled(4, 4, [0, 0, 0]), "first.png")
            .unwrap();
        display
            .show(&Frame::filled(4, 4, [0, 0, 0]), "second.png")
            .unwrap();

        let paths: Vec<PathBuf> = opened.lock().unwrap().clone();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.exists()));

        drop(display);
        assert!(paths.iter().all(|p| !p.exists()));
    }

    #[test]
    fn test_opener_failure_is_error() {
        let attempted = Arc::new(Mutex::new(Vec::new()));
        let sink = attempted.clone();
        let opener: OpenFn = Box::new(move |path: &Path| {
            sink.lock().unwrap().push(path.to_path_buf());
            Err(std::io::Error::other("no viewer"))
        });
        let mut display = ViewerDisplay::with_opener(Box::new(ImageFileWriter::new()), opener);

        let err = display
            .show(&Frame::filled(4, 4, [0, 0, 0]), "x.png")
            .unwrap_err();
        assert!(err.to_string().contains("no viewer"));
        assert!(display.shown().is_empty());
        assert!(!attempted.lock().unwrap()[0].exists());
    }

    #[test]
    fn test_file_stem_sanitizes() {
        assert_eq!(file_stem("a b/c.png"), "a_b_c_png");
        assert_eq!(file_stem(""), "image");
    }
}
