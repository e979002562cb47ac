//! Hue/saturation histogram face encoder.
//!
//! A model-free fallback that summarizes each face crop by its color
//! distribution in a 2D Hue-Saturation histogram. Much weaker than ArcFace
//! at telling people apart, but needs no download and is deterministic,
//! which makes it useful offline and in tests.
use crate::detection::domain::encoding::Encoding;
use crate::detection::domain::face_encoder::FaceEncoder;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

const HUE_BINS: usize = 32;
const SAT_BINS: usize = 32;

/// Length of every encoding this encoder produces.
pub const ENCODING_DIM: usize = HUE_BINS * SAT_BINS;

#[derive(Default)]
pub struct HistogramFaceEncoder;

impl HistogramFaceEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl FaceEncoder for HistogramFaceEncoder {
    fn encode(
        &mut self,
        frame: &Frame,
        boxes: &[BoundingBox],
    ) -> Result<Vec<Encoding>, Box<dyn std::error::Error>> {
        boxes
            .iter()
            .map(|bbox| -> Result<Encoding, Box<dyn std::error::Error>> {
                let crop = frame
                    .crop(bbox)
                    .ok_or_else(|| format!("Face box {bbox:?} lies outside the image"))?;
                Ok(Encoding::normalized(compute_histogram(&crop)))
            })
            .collect()
    }
}

fn compute_histogram(crop: &Frame) -> Vec<f32> {
    let channels = crop.channels() as usize;
    let mut hist = vec![0.0f32; ENCODING_DIM];

    for px in crop.data().chunks_exact(channels) {
        let r = px[0] as f64 / 255.0;
        let g = px[1] as f64 / 255.0;
        let b = px[2] as f64 / 255.0;

        let (h, s, _v) = rgb_to_hsv(r, g, b);

        let h_bin = ((h / 360.0) * HUE_BINS as f64).min(HUE_BINS as f64 - 1.0) as usize;
        let s_bin = (s * SAT_BINS as f64).min(SAT_BINS as f64 - 1.0) as usize;

        hist[h_bin * SAT_BINS + s_bin] += 1.0;
    }

    hist
}

fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { delta / max } else { 0.0 };

    let h = if delta == 0.0 {
        0.0
    } else if (max - r).abs() < f64::EPSILON {
        60.0 * (((g - b) / delta) % 6.0)
    } else if (max - g).abs() < f64::EPSILON {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let h = if h < 0.0 { h + 360.0 } else { h };

    (h, s, v)
}
