use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{constants, util::parse_csv};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub imagekit: FileImageKitConfig,
    #[serde(default)]
    pub gallery: FileGalleryConfig,
}

/// Site-wide asset host settings (`[imagekit]`).
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileImageKitConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Page-level album selection (`[gallery]`).
///
/// The asset host fields are accepted here too and are used only when the
/// site-wide layer leaves them unset.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileGalleryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_transform: Option<String>,
}

/// Environment-derived configuration values.
#[derive(Default, Clone)]
pub struct EnvConfig {
    pub api_key: Option<String>,
    pub api_key_file: Option<PathBuf>,
    pub base_url: Option<String>,
    pub endpoint: Option<String>,
    pub thumbnail_transform: Option<String>,
    pub full_transform: Option<String>,
    pub folder: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl std::fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_file", &self.api_key_file)
            .field("base_url", &self.base_url)
            .field("endpoint", &self.endpoint)
            .field("thumbnail_transform", &self.thumbnail_transform)
            .field("full_transform", &self.full_transform)
            .field("folder", &self.folder)
            .field("tags", &self.tags)
            .finish()
    }
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup, so callers and tests need not
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_key: lookup(constants::ENV_API_KEY),
            api_key_file: lookup(constants::ENV_API_KEY_FILE)
                .map(PathBuf::from),
            base_url: lookup(constants::ENV_BASE_URL),
            endpoint: lookup(constants::ENV_ENDPOINT),
            thumbnail_transform: lookup(constants::ENV_THUMBNAIL_TRANSFORM),
            full_transform: lookup(constants::ENV_FULL_TRANSFORM),
            folder: lookup(constants::ENV_FOLDER),
            tags: lookup(constants::ENV_TAGS).map(|raw| parse_csv(&raw)),
        }
    }
}
