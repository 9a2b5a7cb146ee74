//! Utility functions

pub mod image;
pub mod validation;

pub use image::{ImageKind, detect_image, image_blob_name};
pub use validation::{sanitize_string, validate_cloud_service_name, validate_hackathon_name};
