use crate::shared::bounding_box::BoundingBox;

/// Where a face's caption goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptionLayout {
    /// Filled rectangle behind the text.
    pub background: BoundingBox,
    /// Top-left pixel of the first glyph.
    pub text_origin: (i32, i32),
}

/// Places a caption directly below `face`, anchored at its bottom-left corner.
///
/// The background is sized to the measured text plus `padding` on every side.
/// Nothing is clamped here; drawing clips to the image.
pub fn caption_below(face: &BoundingBox, text_size: (u32, u32), padding: u32) -> CaptionLayout {
    let (tw, th) = (text_size.0 as i32, text_size.1 as i32);
    let pad = padding as i32;
    let top = face.bottom;
    let left = face.left;
    CaptionLayout {
        background: BoundingBox::new(top, left + tw + 2 * pad, top + th + 2 * pad, left),
        text_origin: (left + pad, top + pad),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_starts_at_bottom_left_of_face() {
        let face = BoundingBox::new(10, 110, 90, 30);
        let layout = caption_below(&face, (40, 7), 0);
        assert_eq!(layout.background, BoundingBox::new(90, 70, 97, 30));
        assert_eq!(layout.text_origin, (30, 90));
    }

    #[test]
    fn test_padding_grows_background_around_text() {
        let face = BoundingBox::new(0, 50, 20, 10);
        let layout = caption_below(&face, (12, 7), 2);
        assert_eq!(layout.background.width(), 16);
        assert_eq!(layout.background.height(), 11);
        assert_eq!(layout.text_origin, (12, 22));
    }

    #[test]
    fn test_caption_width_ignores_face_width() {
        let narrow = BoundingBox::new(0, 5, 10, 0);
        let layout = caption_below(&narrow, (100, 7), 1);
        assert_eq!(layout.background.width(), 102);
    }

    #[test]
    fn test_empty_text_still_has_padding_box() {
        let face = BoundingBox::new(0, 10, 10, 0);
        let layout = caption_below(&face, (0, 0), 3);
        assert_eq!(layout.background, BoundingBox::new(10, 6, 16, 0));
    }
}
