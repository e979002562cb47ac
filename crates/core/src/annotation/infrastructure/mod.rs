pub mod bitmap_font;
pub mod caption_box_annotator;
