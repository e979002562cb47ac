use crate::annotation::domain::caption_layout::caption_below;
use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::annotation::infrastructure::bitmap_font::BitmapFont;
use crate::recognition::recognized_face::RecognizedFace;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::{BOX_COLOR, TEXT_COLOR};
use crate::shared::frame::Frame;

/// Image height covered by one unit of automatic font scale.
const AUTO_SCALE_STEP: u32 = 240;
const MAX_AUTO_SCALE: u32 = 8;

/// Draws a rectangle outline around each face and a filled caption box with
/// the face's label directly below it.
pub struct CaptionBoxAnnotator {
    box_color: [u8; 3],
    text_color: [u8; 3],
    thickness: u32,
    padding: u32,
    font_scale: Option<u32>,
}

impl CaptionBoxAnnotator {
    pub fn new(box_color: [u8; 3], text_color: [u8; 3]) -> Self {
        Self {
            box_color,
            text_color,
            thickness: 1,
            padding: 2,
            font_scale: None,
        }
    }

    pub fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness.max(1);
        self
    }

    /// Fixes the font scale instead of deriving it from the image height.
    pub fn with_font_scale(mut self, scale: u32) -> Self {
        self.font_scale = Some(scale);
        self
    }

    fn font_for(&self, frame: &Frame) -> BitmapFont {
        let scale = self
            .font_scale
            .unwrap_or_else(|| (frame.height() / AUTO_SCALE_STEP).clamp(1, MAX_AUTO_SCALE));
        BitmapFont::new(scale)
    }
}

impl Default for CaptionBoxAnnotator {
    fn default() -> Self {
        Self::new(BOX_COLOR, TEXT_COLOR)
    }
}

impl FrameAnnotator for CaptionBoxAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        faces: &[RecognizedFace],
    ) -> Result<(), Box<dyn std::error::Error>> {
        if frame.channels() < 3 {
            return Err(format!("Cannot annotate a {}-channel frame", frame.channels()).into());
        }
        let font = self.font_for(frame);
        for face in faces {
            stroke_rect(frame, &face.bbox, self.thickness, self.box_color);

            let layout = caption_below(&face.bbox, font.measure(&face.label), self.padding);
            fill_rect(frame, &layout.background, self.box_color);
            let (x, y) = layout.text_origin;
            font.draw(frame, x, y, &face.label, self.text_color);
        }
        Ok(())
    }
}

fn fill_rect(frame: &mut Frame, rect: &BoundingBox, color: [u8; 3]) {
    let Some(r) = rect.clamp_to(frame.width(), frame.height()) else {
        return;
    };
    for y in r.top..r.bottom {
        for x in r.left..r.right {
            frame.put_pixel(x, y, color);
        }
    }
}

/// Outline drawn inward from the box edges.
fn stroke_rect(frame: &mut Frame, rect: &BoundingBox, thickness: u32, color: [u8; 3]) {
    let t = (thickness as i32).min(rect.width()).min(rect.height());
    if t <= 0 {
        return;
    }
    let top = BoundingBox::new(rect.top, rect.right, rect.top + t, rect.left);
    let bottom = BoundingBox::new(rect.bottom - t, rect.right, rect.bottom, rect.left);
    let left = BoundingBox::new(rect.top, rect.left + t, rect.bottom, rect.left);
    let right = BoundingBox::new(rect.top, rect.right, rect.bottom, rect.right - t);
    for edge in [top, bottom, left, right] {
        fill_rect(frame, &edge, color);
    }
}
