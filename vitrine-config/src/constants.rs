//! Defaults and environment variable names.

/// ImageKit media library listing endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.imagekit.io/v1/files";

pub const ENV_API_KEY: &str = "IMAGEKIT_API_KEY";
pub const ENV_API_KEY_FILE: &str = "IMAGEKIT_API_KEY_FILE";
pub const ENV_BASE_URL: &str = "IMAGEKIT_BASE_URL";
pub const ENV_ENDPOINT: &str = "IMAGEKIT_ENDPOINT";
pub const ENV_THUMBNAIL_TRANSFORM: &str = "IMAGEKIT_THUMBNAIL_TRANSFORM";
pub const ENV_FULL_TRANSFORM: &str = "IMAGEKIT_FULL_TRANSFORM";
pub const ENV_FOLDER: &str = "GALLERY_FOLDER";
pub const ENV_TAGS: &str = "GALLERY_TAGS";

/// Placeholder shipped in the sample configuration; treated as unset.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_IMAGEKIT_PRIVATE_API_KEY_HERE";
