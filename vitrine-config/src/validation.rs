use thiserror::Error;
use tracing::warn;
use vitrine_model::FileQuery;

use crate::GalleryConfig;

/// Configuration problems that block loading entirely. No network call is
/// attempted while either holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigInvalid {
    #[error("gallery folder or tags not configured")]
    MissingSource,
    #[error("ImageKit API key not configured")]
    MissingApiKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Check that a layered configuration can load a gallery.
///
/// Blocking problems are returned as [`ConfigInvalid`]; anything that only
/// degrades output is collected as a warning.
pub fn validate(
    config: &GalleryConfig,
) -> Result<ConfigWarnings, ConfigInvalid> {
    if !config.has_source() {
        return Err(ConfigInvalid::MissingSource);
    }

    if config.api_key.is_none() {
        warn!(
            "ImageKit API key not configured. Images will not load. \
             See the photography setup documentation."
        );
        return Err(ConfigInvalid::MissingApiKey);
    }

    let mut warnings = ConfigWarnings::default();

    for tag in config.tags.iter().filter(|tag| tag.contains(',')) {
        warnings.push_with_hint(
            format!("tag {tag:?} contains a comma and is ignored"),
            "List each tag as its own entry",
        );
    }

    if config.thumbnail_transform.is_empty() {
        warnings.push_with_hint(
            "thumbnail transform is empty; grid thumbnails load full-size \
             originals",
            "Set imagekit.thumbnail_transform, e.g. \"?tr=w-400,q-80\"",
        );
    }

    if config.full_transform.is_empty() {
        warnings.push_with_hint(
            "full transform is empty; the viewer loads unoptimized originals",
            "Set imagekit.full_transform, e.g. \"?tr=w-1200,q-90\"",
        );
    }

    if config.base_url.is_empty() {
        warnings.push("base URL not configured");
    }

    if config.endpoint.scheme() != "https" {
        warnings.push_with_hint(
            format!("listing endpoint {} is not HTTPS", config.endpoint),
            "The API key is sent with every listing request",
        );
    }

    Ok(warnings)
}

impl GalleryConfig {
    pub fn validate(&self) -> Result<ConfigWarnings, ConfigInvalid> {
        validate(self)
    }

    /// The listing query this configuration selects.
    pub fn file_query(&self) -> Result<FileQuery, ConfigInvalid> {
        FileQuery::new(self.folder.clone(), self.usable_tags())
            .map_err(|_| ConfigInvalid::MissingSource)
    }
}

#[cfg(test)]
mod tests {
    use url::Url;
    use vitrine_model::Transform;

    use super::*;
    use crate::ApiKey;

    fn config() -> GalleryConfig {
        GalleryConfig {
            folder: Some("/Photography".into()),
            tags: Vec::new(),
            base_url: "https://ik.imagekit.io/demo".into(),
            thumbnail_transform: Transform::new("?tr=w-400,q-80"),
            full_transform: Transform::new("?tr=w-1200,q-90"),
            api_key: ApiKey::new("private_key"),
            endpoint: Url::parse("https://api.imagekit.io/v1/files").unwrap(),
        }
    }

    #[test]
    fn complete_config_has_no_warnings() {
        let warnings = validate(&config()).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn missing_folder_and_tags_blocks() {
        let mut cfg = config();
        cfg.folder = None;
        assert_eq!(validate(&cfg).unwrap_err(), ConfigInvalid::MissingSource);
    }

    #[test]
    fn tags_alone_are_a_valid_source() {
        let mut cfg = config();
        cfg.folder = None;
        cfg.tags = vec!["portfolio".into()];
        assert!(validate(&cfg).is_ok());
        assert_eq!(cfg.file_query().unwrap().tags(), ["portfolio"]);
    }

    #[test]
    fn missing_api_key_blocks() {
        let mut cfg = config();
        cfg.api_key = None;
        assert_eq!(validate(&cfg).unwrap_err(), ConfigInvalid::MissingApiKey);
    }

    #[test]
    fn comma_tag_is_skipped_and_folder_query_still_runs() {
        let mut cfg = config();
        cfg.tags = vec!["a,b".into(), "portfolio".into()];

        let warnings = validate(&cfg).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings.items[0].message.contains("\"a,b\""));

        let query = cfg.file_query().unwrap();
        assert_eq!(query.path(), Some("/Photography"));
        assert_eq!(query.tags(), ["portfolio"]);
    }

    #[test]
    fn comma_tags_alone_are_not_a_source() {
        let mut cfg = config();
        cfg.folder = None;
        cfg.tags = vec!["a,b".into()];
        assert_eq!(validate(&cfg).unwrap_err(), ConfigInvalid::MissingSource);
        assert_eq!(cfg.file_query().unwrap_err(), ConfigInvalid::MissingSource);
    }

    #[test]
    fn source_is_checked_before_api_key() {
        let mut cfg = config();
        cfg.folder = None;
        cfg.api_key = None;
        assert_eq!(validate(&cfg).unwrap_err(), ConfigInvalid::MissingSource);
    }

    #[test]
    fn empty_transforms_and_plain_http_warn() {
        let mut cfg = config();
        cfg.thumbnail_transform = Transform::none();
        cfg.endpoint = Url::parse("http://localhost:8080/v1/files").unwrap();
        let warnings = validate(&cfg).unwrap();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.items.iter().all(|w| w.hint.is_some()));
    }
}
