pub mod encoding;
pub mod face_encoder;
pub mod face_localizer;
pub mod face_matcher;
pub mod face_vision;
