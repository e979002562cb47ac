use ndarray::ArrayView3;

use crate::shared::bounding_box::BoundingBox;

/// A decoded image: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; detection, encoding
/// and annotation all work on this buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    /// A frame of `width * height` pixels all set to `rgb`.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..(width * height) {
            data.extend_from_slice(&rgb);
        }
        Self::new(data, width, height, 3)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let c = self.channels as usize;
        let offset = (y as usize * self.width as usize + x as usize) * c;
        Some(&self.data[offset..offset + c])
    }

    /// Overwrites one pixel; coordinates outside the frame are ignored.
    pub fn put_pixel(&mut self, x: i32, y: i32, rgb: [u8; 3]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let c = self.channels as usize;
        let offset = (y as usize * self.width as usize + x as usize) * c;
        let n = c.min(3);
        self.data[offset..offset + n].copy_from_slice(&rgb[..n]);
    }

    /// Copies the part of `bbox` that lies inside the frame.
    ///
    /// Returns `None` when the box does not overlap the frame at all.
    pub fn crop(&self, bbox: &BoundingBox) -> Option<Frame> {
        let clamped = bbox.clamp_to(self.width, self.height)?;
        let c = self.channels as usize;
        let fw = self.width as usize;
        let x0 = clamped.left as usize;
        let y0 = clamped.top as usize;
        let w = clamped.width() as usize;
        let h = clamped.height() as usize;

        let mut data = Vec::with_capacity(w * h * c);
        for row in y0..y0 + h {
            let start = (row * fw + x0) * c;
            data.extend_from_slice(&self.data[start..start + w * c]);
        }
        Some(Frame::new(data, w as u32, h as u32, self.channels))
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_filled_sets_every_pixel() {
        let frame = Frame::filled(3, 2, [10, 20, 30]);
        assert_eq!(frame.data().len(), 18);
        assert_eq!(frame.pixel(2, 1), Some(&[10u8, 20, 30][..]));
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 3);
    }

    #[test]
    fn test_put_pixel_ignores_out_of_bounds() {
        let mut frame = Frame::filled(2, 2, [0, 0, 0]);
        frame.put_pixel(-1, 0, [255, 255, 255]);
        frame.put_pixel(2, 0, [255, 255, 255]);
        frame.put_pixel(0, 5, [255, 255, 255]);
        assert!(frame.data().iter().all(|&b| b == 0));

        frame.put_pixel(1, 1, [9, 8, 7]);
        assert_eq!(frame.pixel(1, 1), Some(&[9u8, 8, 7][..]));
    }

    #[test]
    fn test_crop_copies_inner_region() {
        let mut frame = Frame::filled(4, 4, [0, 0, 0]);
        frame.put_pixel(1, 2, [200, 100, 50]);
        let crop = frame.crop(&BoundingBox::new(2, 3, 4, 1)).unwrap();
        assert_eq!(crop.width(), 2);
        assert_eq!(crop.height(), 2);
        assert_eq!(crop.pixel(0, 0), Some(&[200u8, 100, 50][..]));
    }

    #[test]
    fn test_crop_clamps_partially_outside_box() {
        let frame = Frame::filled(10, 10, [1, 1, 1]);
        let crop = frame.crop(&BoundingBox::new(-5, 20, 3, 8)).unwrap();
        assert_eq!(crop.width(), 2);
        assert_eq!(crop.height(), 3);
    }

    #[test]
    fn test_crop_outside_frame_is_none() {
        let frame = Frame::filled(10, 10, [1, 1, 1]);
        assert!(frame.crop(&BoundingBox::new(20, 40, 30, 30)).is_none());
    }

    #[test]
    fn test_as_ndarray_shape() {
        let frame = Frame::new(vec![0u8; 24], 4, 2, 3); // 2x4x3
        assert_eq!(frame.as_ndarray().shape(), &[2, 4, 3]); // (height, width, channels)
    }

    #[test]
    fn test_as_ndarray_indexes_row_col_channel() {
        let mut frame = Frame::new(vec![0u8; 12], 2, 2, 3);
        frame.put_pixel(1, 0, [0, 0, 128]);
        assert_eq!(frame.as_ndarray()[[0, 1, 2]], 128);
    }
}
