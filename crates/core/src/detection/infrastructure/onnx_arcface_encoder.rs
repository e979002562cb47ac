/// ArcFace face encoder using ONNX Runtime.
///
/// Each face box is padded, cropped, resized to 112x112 and embedded.
/// Output encodings are L2-normalized so cosine similarity is a dot product.
use std::path::Path;

use crate::detection::domain::encoding::Encoding;
use crate::detection::domain::face_encoder::FaceEncoder;
use crate::detection::infrastructure::onnx_session;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

const INPUT_SIZE: usize = 112;
const NORM_MEAN: f32 = 127.5;
const NORM_STD: f32 = 127.5;

/// Context kept around the face on every side, as a fraction of its size.
const CROP_PADDING: f64 = 0.2;

pub struct OnnxArcfaceEncoder {
    session: ort::session::Session,
}

impl OnnxArcfaceEncoder {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            session: onnx_session::load_session(model_path)?,
        })
    }

    fn embed(&mut self, crop: &Frame) -> Result<Encoding, Box<dyn std::error::Error>> {
        let tensor = preprocess(crop);
        let input_value = ort::value::Tensor::from_array(tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        check_output_count(outputs.len())?;
        let embedding_array = outputs[0].try_extract_array::<f32>()?;
        let embedding_slice = embedding_array
            .as_slice()
            .ok_or("Cannot get embedding slice")?;
        Ok(Encoding::normalized(embedding_slice.to_vec()))
    }
}

impl FaceEncoder for OnnxArcfaceEncoder {
    fn encode(
        &mut self,
        frame: &Frame,
        boxes: &[BoundingBox],
    ) -> Result<Vec<Encoding>, Box<dyn std::error::Error>> {
        boxes
            .iter()
            .map(|bbox| -> Result<Encoding, Box<dyn std::error::Error>> {
                let crop = face_crop(frame, bbox)?;
                self.embed(&crop)
            })
            .collect()
    }
}

fn check_output_count(count: usize) -> Result<(), Box<dyn std::error::Error>> {
    if count < 1 {
        return Err(format!("ArcFace model expected 1 output, got {count}").into());
    }
    Ok(())
}

fn face_crop(frame: &Frame, bbox: &BoundingBox) -> Result<Frame, Box<dyn std::error::Error>> {
    frame
        .crop(&bbox.pad(CROP_PADDING))
        .ok_or_else(|| format!("Face box {bbox:?} lies outside the image").into())
}

/// Resize crop to 112x112, normalize, NCHW layout.
fn preprocess(crop: &Frame) -> ndarray::Array4<f32> {
    let src = crop.as_ndarray();
    let src_w = crop.width() as usize;
    let src_h = crop.height() as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, INPUT_SIZE, INPUT_SIZE));

    for y in 0..INPUT_SIZE {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / INPUT_SIZE as f64) as usize).min(src_h - 1);
        for x in 0..INPUT_SIZE {
            let src_x =
                (((x as f64 + 0.5) * src_w as f64 / INPUT_SIZE as f64) as usize).min(src_w - 1);
            for c in 0..3 {
                tensor[[0, c, y, x]] = (src[[src_y, src_x, c]] as f32 - NORM_MEAN) / NORM_STD;
            }
        }
    }

    tensor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_preprocess_shape() {
        let crop = Frame::filled(50, 30, [128, 128, 128]);
        assert_eq!(preprocess(&crop).shape(), &[1, 3, 112, 112]);
    }

    #[rstest]
    #[case::mid(127, (127.0 - 127.5) / 127.5)]
    #[case::max(255, 1.0)]
    #[case::min(0, -1.0)]
    fn test_preprocess_normalization(#[case] value: u8, #[case] expected: f32) {
        let crop = Frame::filled(10, 10, [value, value, value]);
        let tensor = preprocess(&crop);
        assert!((tensor[[0, 0, 0, 0]] - expected).abs() < 0.01);
    }

    #[test]
    fn test_face_crop_includes_padding() {
        let frame = Frame::filled(200, 200, [0, 0, 0]);
        let crop = face_crop(&frame, &BoundingBox::from_xywh(50, 50, 100, 100)).unwrap();
        assert_eq!(crop.width(), 140);
        assert_eq!(crop.height(), 140);
    }

    #[test]
    fn test_face_crop_clamps_at_edges() {
        let frame = Frame::filled(100, 100, [0, 0, 0]);
        let crop = face_crop(&frame, &BoundingBox::from_xywh(0, 0, 50, 50)).unwrap();
        assert_eq!(crop.width(), 60);
        assert_eq!(crop.height(), 60);
    }

    #[test]
    fn test_model_without_outputs_is_error() {
        let err = check_output_count(0).unwrap_err();
        assert!(err.to_string().contains("expected 1 output, got 0"));
        assert!(check_output_count(1).is_ok());
    }

    #[test]
    fn test_face_crop_outside_image_is_error() {
        let frame = Frame::filled(100, 100, [0, 0, 0]);
        assert!(face_crop(&frame, &BoundingBox::from_xywh(500, 500, 10, 10)).is_err());
    }
}
