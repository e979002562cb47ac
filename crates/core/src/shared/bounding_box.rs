use serde::Serialize;

/// A face location in pixel coordinates, ordered `(top, right, bottom, left)`.
///
/// `right` and `bottom` are exclusive, so `width() == right - left`.
/// Coordinates may lie outside the image; callers clamp when they need
/// pixel access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct BoundingBox {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl BoundingBox {
    pub fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(y, x + width, y + height, x)
    }

    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Intersection with a `width x height` image, or `None` if nothing remains.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<BoundingBox> {
        let clamped = BoundingBox {
            top: self.top.clamp(0, height as i32),
            right: self.right.clamp(0, width as i32),
            bottom: self.bottom.clamp(0, height as i32),
            left: self.left.clamp(0, width as i32),
        };
        if clamped.is_empty() {
            None
        } else {
            Some(clamped)
        }
    }

    /// Grows the box by `ratio` of its size on every side.
    pub fn pad(&self, ratio: f64) -> BoundingBox {
        let dx = (self.width() as f64 * ratio) as i32;
        let dy = (self.height() as f64 * ratio) as i32;
        BoundingBox {
            top: self.top - dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
            left: self.left - dx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_from_xywh_matches_css_order() {
        let b = BoundingBox::from_xywh(10, 20, 30, 40);
        assert_eq!(b, BoundingBox::new(20, 40, 60, 10));
        assert_eq!(b.width(), 30);
        assert_eq!(b.height(), 40);
    }

    #[test]
    fn test_inverted_box_is_empty() {
        let b = BoundingBox::new(50, 10, 20, 40);
        assert_eq!(b.width(), 0);
        assert_eq!(b.height(), 0);
        assert!(b.is_empty());
    }

    // ── Clamping and padding ─────────────────────────────────────────

    #[rstest]
    #[case::inside(BoundingBox::new(5, 20, 15, 2), 100, 100, Some(BoundingBox::new(5, 20, 15, 2)))]
    #[case::cut_at_edges(BoundingBox::new(-10, 120, 50, -5), 100, 80, Some(BoundingBox::new(0, 100, 50, 0)))]
    #[case::outside(BoundingBox::new(200, 300, 250, 210), 100, 100, None)]
    fn test_clamp_to(
        #[case] b: BoundingBox,
        #[case] width: u32,
        #[case] height: u32,
        #[case] expected: Option<BoundingBox>,
    ) {
        assert_eq!(b.clamp_to(width, height), expected);
    }

    #[test]
    fn test_pad_grows_each_side() {
        let b = BoundingBox::from_xywh(100, 100, 50, 100);
        let padded = b.pad(0.2);
        assert_eq!(padded, BoundingBox::new(80, 160, 220, 90));
    }
}
