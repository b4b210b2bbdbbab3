//! Core data model definitions shared across Vitrine crates.
#![allow(missing_docs)]

pub mod alt_text;
pub mod error;
pub mod query;
pub mod record;
pub mod transform;

// Intentionally curated re-exports for downstream consumers.
pub use alt_text::generate_alt_text;
pub use error::{ModelError, Result as ModelResult};
pub use query::FileQuery;
pub use record::{
    IMAGE_EXTENSIONS, IMAGE_FILE_TYPE, ImageRecord, filter_image_files,
};
pub use transform::{ImageVariant, Transform};
