//! Shared configuration library for Vitrine.
//!
//! Gallery pages combine two layers of settings: site-wide asset host
//! settings (base URL, transforms, API key) and page-level album selection
//! (folder and tags). This crate loads both from a TOML file and the
//! environment, layers them, and validates the result before any network
//! call is attempted.

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::sources::{
    EnvConfig, FileConfig, FileGalleryConfig, FileImageKitConfig,
};
pub use models::{
    ApiKey, ApiKeySource, ConfigMetadata, GalleryConfig, PageSettings,
    SiteSettings,
};
pub use validation::{ConfigInvalid, ConfigWarning, ConfigWarnings};
