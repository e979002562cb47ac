pub mod annotation;
pub mod detection;
pub mod imaging;
pub mod pipeline;
pub mod recognition;
pub mod shared;
