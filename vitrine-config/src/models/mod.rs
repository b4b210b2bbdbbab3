pub mod sources;

use std::fmt;
use std::path::PathBuf;

use url::Url;
use vitrine_model::{ImageVariant, Transform};

use crate::constants::PLACEHOLDER_API_KEY;

/// Private API key for the asset host. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for blank values and the sample placeholder.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == PLACEHOLDER_API_KEY {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Site-wide asset host layer, shared by every gallery page.
#[derive(Debug, Clone, Default)]
pub struct SiteSettings {
    pub base_url: Option<String>,
    pub api_key: Option<ApiKey>,
    pub thumbnail_transform: Option<String>,
    pub full_transform: Option<String>,
}

/// Page-level layer: which album to show, plus optional fallbacks for the
/// site-wide fields.
#[derive(Debug, Clone, Default)]
pub struct PageSettings {
    pub folder: Option<String>,
    pub tags: Vec<String>,
    pub base_url: Option<String>,
    pub api_key: Option<ApiKey>,
    pub thumbnail_transform: Option<String>,
    pub full_transform: Option<String>,
}

/// Fully layered gallery configuration.
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    pub folder: Option<String>,
    pub tags: Vec<String>,
    pub base_url: String,
    pub thumbnail_transform: Transform,
    pub full_transform: Transform,
    pub api_key: Option<ApiKey>,
    pub endpoint: Url,
}

impl GalleryConfig {
    /// Combine both layers. Site-wide values win for the base URL, the
    /// transforms and the API key; folder and tags come from the page.
    pub fn layered(
        site: SiteSettings,
        page: PageSettings,
        endpoint: Url,
    ) -> Self {
        Self {
            folder: page.folder,
            tags: page.tags,
            base_url: site.base_url.or(page.base_url).unwrap_or_default(),
            thumbnail_transform: site
                .thumbnail_transform
                .or(page.thumbnail_transform)
                .map(Transform::from)
                .unwrap_or_default(),
            full_transform: site
                .full_transform
                .or(page.full_transform)
                .map(Transform::from)
                .unwrap_or_default(),
            api_key: site.api_key.or(page.api_key),
            endpoint,
        }
    }

    /// Tags that can be sent to the listing endpoint. A tag containing a
    /// comma would split once the tags are joined, so it is skipped.
    pub fn usable_tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty() && !tag.contains(','))
    }

    pub fn has_source(&self) -> bool {
        self.folder.is_some() || self.usable_tags().next().is_some()
    }

    pub fn transform(&self, variant: ImageVariant) -> &Transform {
        match variant {
            ImageVariant::Thumbnail => &self.thumbnail_transform,
            ImageVariant::Full => &self.full_transform,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
    pub api_key_source: Option<ApiKeySource>,
}

/// Where the effective API key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Env,
    EnvFile,
    SiteFile,
    PageFile,
}
