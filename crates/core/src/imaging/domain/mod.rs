pub mod image_display;
pub mod image_reader;
pub mod image_writer;
