/// UltraFace (RFB-320) face localizer using ONNX Runtime via `ort`.
///
/// A lightweight detector producing boxes only. The model emits per-anchor
/// `scores` ([1, N, 2], background/face) and normalized `boxes` ([1, N, 4]).
use std::path::Path;

use crate::detection::domain::face_localizer::FaceLocalizer;
use crate::detection::infrastructure::math::{self, ScoredBox};
use crate::detection::infrastructure::onnx_session;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Fallback input resolution `(height, width)` for the RFB-320 model.
const DEFAULT_INPUT_HW: (usize, usize) = (240, 320);

/// Default face confidence threshold.
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f64 = 0.3;

const NORM_MEAN: f32 = 127.0;
const NORM_STD: f32 = 128.0;

pub struct OnnxUltrafaceLocalizer {
    session: ort::session::Session,
    confidence: f64,
    input_hw: (usize, usize),
}

impl OnnxUltrafaceLocalizer {
    /// Load an UltraFace ONNX model.
    ///
    /// The input resolution is read from the model so the 640x480 variant
    /// works too.
    pub fn new(model_path: &Path, confidence: f64) -> Result<Self, Box<dyn std::error::Error>> {
        let session = onnx_session::load_session(model_path)?;
        let input_hw = onnx_session::input_hw(&session).unwrap_or(DEFAULT_INPUT_HW);
        Ok(Self {
            session,
            confidence,
            input_hw,
        })
    }
}

impl FaceLocalizer for OnnxUltrafaceLocalizer {
    fn localize(&mut self, frame: &Frame) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
        if frame.width() == 0 || frame.height() == 0 {
            return Ok(Vec::new());
        }

        let input_tensor = preprocess(frame, self.input_hw);
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() < 2 {
            return Err(format!("UltraFace model expected 2 outputs, got {}", outputs.len()).into());
        }

        let scores = outputs[0].try_extract_array::<f32>()?;
        let boxes = outputs[1].try_extract_array::<f32>()?;
        let score_data = scores.as_slice().ok_or("Cannot get score slice")?;
        let box_data = boxes.as_slice().ok_or("Cannot get box slice")?;

        let mut raw = decode(
            score_data,
            box_data,
            frame.width(),
            frame.height(),
            self.confidence,
        );
        let kept = math::nms(&mut raw, NMS_IOU_THRESH);
        log::debug!("UltraFace kept {} of {} candidates", kept.len(), raw.len());

        Ok(to_bounding_boxes(&kept, frame.width(), frame.height()))
    }
}

/// Resize frame to the model input and normalize to NCHW float32.
fn preprocess(frame: &Frame, (dst_h, dst_w): (usize, usize)) -> ndarray::Array4<f32> {
    let src = frame.as_ndarray();
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, dst_h, dst_w));

    for y in 0..dst_h {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / dst_h as f64) as usize).min(src_h - 1);
        for x in 0..dst_w {
            let src_x = (((x as f64 + 0.5) * src_w as f64 / dst_w as f64) as usize).min(src_w - 1);
            for c in 0..3 {
                tensor[[0, c, y, x]] = (src[[src_y, src_x, c]] as f32 - NORM_MEAN) / NORM_STD;
            }
        }
    }

    tensor
}

/// Turn raw anchor outputs into scored pixel boxes above `confidence`.
fn decode(scores: &[f32], boxes: &[f32], fw: u32, fh: u32, confidence: f64) -> Vec<ScoredBox> {
    let num_anchors = (scores.len() / 2).min(boxes.len() / 4);
    let (fw, fh) = (fw as f64, fh as f64);

    (0..num_anchors)
        .filter_map(|i| {
            let score = scores[i * 2 + 1] as f64;
            if score < confidence {
                return None;
            }
            let b = &boxes[i * 4..i * 4 + 4];
            Some(ScoredBox {
                bbox: [
                    b[0] as f64 * fw,
                    b[1] as f64 * fh,
                    b[2] as f64 * fw,
                    b[3] as f64 * fh,
                ],
                score,
            })
        })
        .collect()
}

fn to_bounding_boxes(dets: &[ScoredBox], fw: u32, fh: u32) -> Vec<BoundingBox> {
    dets.iter()
        .filter_map(|d| {
            let [x1, y1, x2, y2] = d.bbox;
            BoundingBox::new(
                y1.round() as i32,
                x2.round() as i32,
                y2.round() as i32,
                x1.round() as i32,
            )
            .clamp_to(fw, fh)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_shape() {
        let frame = Frame::filled(200, 100, [128, 128, 128]);
        let tensor = preprocess(&frame, DEFAULT_INPUT_HW);
        assert_eq!(tensor.shape(), &[1, 3, 240, 320]);
    }

    #[test]
    fn test_preprocess_normalization() {
        let frame = Frame::filled(10, 10, [255, 127, 0]);
        let tensor = preprocess(&frame, (4, 4));
        assert!((tensor[[0, 0, 0, 0]] - 1.0).abs() < 0.01);
        assert!(tensor[[0, 1, 0, 0]].abs() < 1e-6);
        assert!((tensor[[0, 2, 0, 0]] - (-127.0 / 128.0)).abs() < 1e-6);
    }

    #[test]
    fn test_decode_filters_by_face_score() {
        let scores = [0.9, 0.1, 0.2, 0.8];
        let boxes = [0.0, 0.0, 0.5, 0.5, 0.25, 0.25, 0.75, 0.75];
        let dets = decode(&scores, &boxes, 200, 100, 0.7);
        assert_eq!(dets.len(), 1);
        assert_eq!(dets[0].bbox, [50.0, 25.0, 150.0, 75.0]);
        assert!((dets[0].score - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_decode_tolerates_truncated_outputs() {
        let scores = [0.0, 0.9, 0.0, 0.9];
        let boxes = [0.0, 0.0, 1.0, 1.0];
        assert_eq!(decode(&scores, &boxes, 10, 10, 0.5).len(), 1);
    }

    #[test]
    fn test_to_bounding_boxes_clamps_and_orders_css() {
        let dets = vec![ScoredBox {
            bbox: [-10.0, 5.0, 60.0, 120.0],
            score: 0.9,
        }];
        let boxes = to_bounding_boxes(&dets, 50, 100);
        assert_eq!(boxes, vec![BoundingBox::new(5, 50, 100, 0)]);
    }

    #[test]
    fn test_to_bounding_boxes_drops_off_frame() {
        let dets = vec![ScoredBox {
            bbox: [200.0, 200.0, 250.0, 250.0],
            score: 0.9,
        }];
        assert!(to_bounding_boxes(&dets, 100, 100).is_empty());
    }
}
