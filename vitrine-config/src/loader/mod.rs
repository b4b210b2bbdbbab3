pub mod error;

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use url::Url;

use crate::{
    ApiKey, ConfigMetadata, GalleryConfig, PageSettings, SiteSettings,
    constants::DEFAULT_ENDPOINT,
    models::{
        ApiKeySource,
        sources::{EnvConfig, FileConfig},
    },
    util::{non_blank, read_secret_file},
};
use error::ConfigLoadError;

/// Result of a successful load: the layered config and where it came from.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: GalleryConfig,
    pub metadata: ConfigMetadata,
}

/// Composes file and environment sources into a [`GalleryConfig`].
///
/// Precedence within each layer is environment first, then file. Loading
/// never validates; call [`GalleryConfig::validate`] on the result.
#[derive(Debug, Default, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
    env: Option<EnvConfig>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Load a `.env` file into the process environment before gathering.
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Use the given environment snapshot instead of the process environment.
    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.env = Some(env);
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let mut metadata = ConfigMetadata::default();

        if let Some(path) = self.env_file.as_deref() {
            dotenvy::from_path(path)?;
            metadata.env_file_loaded = true;
            debug!(path = %path.display(), "loaded env file");
        }

        let file = match self.config_path.as_deref() {
            Some(path) => {
                metadata.config_path = Some(path.to_path_buf());
                read_file_config(path)?
            }
            None => FileConfig::default(),
        };

        let env = self.env.clone().unwrap_or_else(EnvConfig::gather);

        let (site_key, key_source) = resolve_site_api_key(&env, &file)?;
        let page_key = file.gallery.api_key.clone().and_then(ApiKey::new);
        metadata.api_key_source = key_source.or_else(|| {
            page_key.as_ref().map(|_| ApiKeySource::PageFile)
        });

        let site = SiteSettings {
            base_url: non_blank(env.base_url.clone())
                .or_else(|| non_blank(file.imagekit.base_url.clone())),
            api_key: site_key,
            thumbnail_transform: env
                .thumbnail_transform
                .clone()
                .or_else(|| file.imagekit.thumbnail_transform.clone()),
            full_transform: env
                .full_transform
                .clone()
                .or_else(|| file.imagekit.full_transform.clone()),
        };

        let page = PageSettings {
            folder: non_blank(env.folder.clone())
                .or_else(|| non_blank(file.gallery.folder.clone())),
            tags: env
                .tags
                .clone()
                .unwrap_or_else(|| file.gallery.tags.clone()),
            base_url: non_blank(file.gallery.base_url.clone()),
            api_key: page_key,
            thumbnail_transform: file.gallery.thumbnail_transform.clone(),
            full_transform: file.gallery.full_transform.clone(),
        };

        let endpoint_raw = non_blank(env.endpoint.clone())
            .or_else(|| non_blank(file.imagekit.endpoint.clone()))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&endpoint_raw).map_err(|source| {
            ConfigLoadError::InvalidEndpoint {
                value: endpoint_raw.clone(),
                source,
            }
        })?;

        let config = GalleryConfig::layered(site, page, endpoint);
        info!(
            folder = config.folder.as_deref().unwrap_or(""),
            tags = config.tags.len(),
            has_api_key = config.api_key.is_some(),
            "gallery configuration loaded"
        );

        Ok(ConfigLoad { config, metadata })
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| {
        ConfigLoadError::FileIo {
            path: path.to_path_buf(),
            source,
        }
    })?;
    toml::from_str(&raw).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn resolve_site_api_key(
    env: &EnvConfig,
    file: &FileConfig,
) -> Result<(Option<ApiKey>, Option<ApiKeySource>), ConfigLoadError> {
    if let Some(key) = env.api_key.clone().and_then(ApiKey::new) {
        return Ok((Some(key), Some(ApiKeySource::Env)));
    }

    if let Some(path) = env.api_key_file.as_deref()
        && let Some(key) = read_secret_file(path)?.and_then(ApiKey::new)
    {
        return Ok((Some(key), Some(ApiKeySource::EnvFile)));
    }

    if let Some(key) = file.imagekit.api_key.clone().and_then(ApiKey::new) {
        return Ok((Some(key), Some(ApiKeySource::SiteFile)));
    }

    if let Some(path) = file.imagekit.api_key_file.as_deref()
        && let Some(key) = read_secret_file(path)?.and_then(ApiKey::new)
    {
        return Ok((Some(key), Some(ApiKeySource::SiteFile)));
    }

    Ok((None, None))
}
