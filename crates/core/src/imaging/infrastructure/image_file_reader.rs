use std::path::Path;

use crate::imaging::domain::image_reader::ImageReader;
use crate::shared::frame::Frame;

/// Decodes image files with the `image` crate.
///
/// The format is sniffed from the file contents, so files without a
/// meaningful extension still decode. Anything that is not an image fails
/// with an error naming the path.
#[derive(Default)]
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
        let decoded = image::ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
            .decode()
            .map_err(|e| format!("Failed to decode {}: {e}", path.display()))?;

        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(Frame::new(rgb.into_raw(), width, height, 3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let mut img = image::RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([50, 100, 200]);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_read_returns_rgb_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), "face.png", 100, 80);

        let frame = ImageFileReader::new().read(&path).unwrap();
        assert_eq!(frame.width(), 100);
        assert_eq!(frame.height(), 80);
        assert_eq!(frame.channels(), 3);
        assert_eq!(&frame.data()[..3], &[50, 100, 200]);
    }

    #[test]
    fn test_read_sniffs_format_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let png = write_test_image(dir.path(), "face.png", 8, 8);
        let bare = dir.path().join("face");
        std::fs::rename(&png, &bare).unwrap();

        let frame = ImageFileReader::new().read(&bare).unwrap();
        assert_eq!(frame.width(), 8);
    }

    #[test]
    fn test_read_nonexistent_is_error() {
        let err = ImageFileReader::new()
            .read(Path::new("/nonexistent/face.png"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/face.png"));
    }

    #[test]
    fn test_read_non_image_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"not an image").unwrap();

        let err = ImageFileReader::new().read(&path).unwrap_err();
        assert!(err.to_string().contains("notes.txt"));
    }
}
