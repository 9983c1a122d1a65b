mod email_client;
mod image_store;

pub use email_client::{Email, EmailClient};
pub use image_store::{validate_image, ImageStore, ImageUpload, UnconfiguredImageStore};
