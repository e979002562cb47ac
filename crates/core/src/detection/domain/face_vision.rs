use crate::detection::domain::encoding::Encoding;
use crate::detection::domain::face_encoder::FaceEncoder;
use crate::detection::domain::face_localizer::FaceLocalizer;
use crate::detection::domain::face_matcher::FaceMatcher;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// One located and encoded face.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedFace {
    pub bbox: BoundingBox,
    pub encoding: Encoding,
}

/// The vision capability the recognizer depends on: localize, encode, compare.
///
/// Any combination of backends can be plugged in, e.g. an ONNX localizer with
/// a histogram encoder when the embedding model is unavailable.
pub struct FaceVision {
    localizer: Box<dyn FaceLocalizer>,
    encoder: Box<dyn FaceEncoder>,
    matcher: Box<dyn FaceMatcher>,
}

impl FaceVision {
    pub fn new(
        localizer: Box<dyn FaceLocalizer>,
        encoder: Box<dyn FaceEncoder>,
        matcher: Box<dyn FaceMatcher>,
    ) -> Self {
        Self {
            localizer,
            encoder,
            matcher,
        }
    }

    pub fn localize(
        &mut self,
        frame: &Frame,
    ) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
        self.localizer.localize(frame)
    }

    /// Encodes `boxes`, rejecting encoders that break the one-per-box contract.
    pub fn encode(
        &mut self,
        frame: &Frame,
        boxes: &[BoundingBox],
    ) -> Result<Vec<Encoding>, Box<dyn std::error::Error>> {
        if boxes.is_empty() {
            return Ok(Vec::new());
        }
        let encodings = self.encoder.encode(frame, boxes)?;
        if encodings.len() != boxes.len() {
            return Err(format!(
                "Encoder returned {} encodings for {} faces",
                encodings.len(),
                boxes.len()
            )
            .into());
        }
        Ok(encodings)
    }

    pub fn matcher(&self) -> &dyn FaceMatcher {
        self.matcher.as_ref()
    }

    /// Localizes then encodes every face in `frame`.
    pub fn detect(&mut self, frame: &Frame) -> Result<Vec<DetectedFace>, Box<dyn std::error::Error>> {
        let boxes = self.localize(frame)?;
        let encodings = self.encode(frame, &boxes)?;
        Ok(boxes
            .into_iter()
            .zip(encodings)
            .map(|(bbox, encoding)| DetectedFace { bbox, encoding })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubLocalizer {
        boxes: Vec<BoundingBox>,
    }

    impl FaceLocalizer for StubLocalizer {
        fn localize(
            &mut self,
            _frame: &Frame,
        ) -> Result<Vec<BoundingBox>, Box<dyn std::error::Error>> {
            Ok(self.boxes.clone())
        }
    }

    /// Encodes each box as `[left, top]` and records how often it ran.
    struct CoordinateEncoder {
        calls: Arc<Mutex<usize>>,
        drop_last: bool,
    }

    impl FaceEncoder for CoordinateEncoder {
        fn encode(
            &mut self,
            _frame: &Frame,
            boxes: &[BoundingBox],
        ) -> Result<Vec<Encoding>, Box<dyn std::error::Error>> {
            *self.calls.lock().unwrap() += 1;
            let mut out: Vec<Encoding> = boxes
                .iter()
                .map(|b| Encoding::new(vec![b.left as f32, b.top as f32]))
                .collect();
            if self.drop_last {
                out.pop();
            }
            Ok(out)
        }
    }

    struct EqualMatcher;

    impl FaceMatcher for EqualMatcher {
        fn compare(
            &self,
            known: &[Encoding],
            query: &Encoding,
        ) -> Result<Vec<bool>, Box<dyn std::error::Error>> {
            Ok(known.iter().map(|k| k == query).collect())
        }
    }

    fn vision(boxes: Vec<BoundingBox>, drop_last: bool) -> (FaceVision, Arc<Mutex<usize>>) {
        let calls = Arc::new(Mutex::new(0));
        let v = FaceVision::new(
            Box::new(StubLocalizer { boxes }),
            Box::new(CoordinateEncoder {
                calls: calls.clone(),
                drop_last,
            }),
            Box::new(EqualMatcher),
        );
        (v, calls)
    }

    fn frame() -> Frame {
        Frame::filled(64, 64, [128, 128, 128])
    }

    #[test]
    fn test_detect_pairs_boxes_with_encodings_in_order() {
        let boxes = vec![
            BoundingBox::from_xywh(1, 2, 10, 10),
            BoundingBox::from_xywh(30, 40, 10, 10),
        ];
        let (mut v, _) = vision(boxes.clone(), false);

        let faces = v.detect(&frame()).unwrap();
        assert_eq!(faces.len(), 2);
        assert_eq!(faces[0].bbox, boxes[0]);
        assert_eq!(faces[0].encoding.as_slice(), &[1.0, 2.0]);
        assert_eq!(faces[1].encoding.as_slice(), &[30.0, 40.0]);
    }

    #[test]
    fn test_no_faces_skips_encoder() {
        let (mut v, calls) = vision(vec![], false);
        let faces = v.detect(&frame()).unwrap();
        assert!(faces.is_empty());
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_encoder_count_mismatch_is_error() {
        let (mut v, _) = vision(vec![BoundingBox::from_xywh(0, 0, 5, 5)], true);
        let err = v.detect(&frame()).unwrap_err();
        assert!(err.to_string().contains("0 encodings for 1 faces"));
    }

    #[test]
    fn test_matcher_is_exposed_for_classification() {
        let (v, _) = vision(vec![], false);
        let known = vec![Encoding::new(vec![1.0]), Encoding::new(vec![2.0])];
        let result = v
            .matcher()
            .compare(&known, &Encoding::new(vec![2.0]))
            .unwrap();
        assert_eq!(result, vec![false, true]);
    }
}
