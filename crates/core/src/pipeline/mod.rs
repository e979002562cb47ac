pub mod build_reference_set_use_case;
pub mod dataset_walker;
pub mod pipeline_logger;
pub mod recognize_image_use_case;
pub mod validate_directory_use_case;
