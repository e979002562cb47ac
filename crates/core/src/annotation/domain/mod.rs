pub mod caption_layout;
pub mod frame_annotator;
