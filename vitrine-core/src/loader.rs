//! Fetches an album and hands it to a renderer.

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use vitrine_config::{ConfigInvalid, GalleryConfig};
use vitrine_model::{ImageRecord, filter_image_files};

use crate::api::{AssetSource, ImageKitClient};
use crate::dom::Document;
use crate::error::{FetchError, GalleryError};
use crate::render::Renderer;
use crate::status::{StatusNotice, hide_loading};

/// How a page load ended. Every variant has already been reflected in the
/// document by the time it is returned.
#[derive(Debug)]
pub enum LoadOutcome {
    Rendered { count: usize },
    Empty,
    Failed(FetchError),
    Blocked(ConfigInvalid),
}

#[derive(Clone)]
pub struct GalleryLoader {
    config: GalleryConfig,
    source: Option<Arc<dyn AssetSource>>,
}

impl std::fmt::Debug for GalleryLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryLoader")
            .field("config", &self.config)
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

impl GalleryLoader {
    pub fn new(config: GalleryConfig, source: Arc<dyn AssetSource>) -> Self {
        Self {
            config,
            source: Some(source),
        }
    }

    /// Loader backed by ImageKit. Without an API key the loader still
    /// exists but every load is blocked with [`ConfigInvalid::MissingApiKey`].
    pub fn imagekit(config: GalleryConfig) -> Result<Self, FetchError> {
        let source = ImageKitClient::from_config(&config)?
            .map(|client| Arc::new(client) as Arc<dyn AssetSource>);
        Ok(Self { config, source })
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Validate, query the asset host and keep only gallery images.
    pub async fn fetch_images(&self) -> Result<Vec<ImageRecord>, GalleryError> {
        let warnings = self.config.validate()?;
        for warning in &warnings.items {
            warn!(hint = ?warning.hint, "{}", warning.message);
        }

        let query = self.config.file_query()?;
        let source = self.source.as_ref().ok_or(ConfigInvalid::MissingApiKey)?;

        info!(
            folder = ?query.path(),
            tags = ?query.tags(),
            "fetching album"
        );
        let files = source.list_files(&query).await?;
        let total = files.len();
        let images = filter_image_files(files);
        debug!(total, count = images.len(), "album filtered");
        Ok(images)
    }

    /// Load the album into `doc`, reporting problems inline instead of
    /// returning them.
    pub async fn load<R>(
        &self,
        doc: &mut Document,
        renderer: &mut R,
    ) -> LoadOutcome
    where
        R: Renderer + ?Sized,
    {
        match self.fetch_images().await {
            Err(GalleryError::Config(invalid)) => {
                warn!(reason = %invalid, "gallery load blocked");
                StatusNotice::from(invalid).show(doc);
                LoadOutcome::Blocked(invalid)
            }
            Err(GalleryError::Fetch(err)) => {
                error!(
                    status = ?err.status(),
                    error = %err,
                    "failed to load album"
                );
                if let FetchError::Status { body, .. } = &err {
                    debug!(body = %body, "listing error response");
                }
                StatusNotice::FetchFailed(err.to_string()).show(doc);
                LoadOutcome::Failed(err)
            }
            Ok(images) if images.is_empty() => {
                info!("album contains no images");
                StatusNotice::NoImages.show(doc);
                LoadOutcome::Empty
            }
            Ok(images) => {
                let count = images.len();
                hide_loading(doc);
                renderer.render(doc, images);
                info!(count, "album rendered");
                LoadOutcome::Rendered { count }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::always;
    use url::Url;
    use vitrine_config::ApiKey;
    use vitrine_model::Transform;

    use super::*;
    use crate::api::MockAssetSource;
    use crate::status::LOADING_MESSAGE_ID;

    #[derive(Default)]
    struct Recorder {
        rendered: Option<Vec<ImageRecord>>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, _doc: &mut Document, images: Vec<ImageRecord>) {
            self.rendered = Some(images);
        }
    }

    fn config() -> GalleryConfig {
        GalleryConfig {
            folder: Some("/Photography/Coast".into()),
            tags: Vec::new(),
            base_url: "https://ik.imagekit.io/demo".into(),
            thumbnail_transform: Transform::new("?tr=w-400,q-80"),
            full_transform: Transform::new("?tr=w-1200,q-90"),
            api_key: ApiKey::new("private_test"),
            endpoint: Url::parse("https://api.imagekit.io/v1/files").unwrap(),
        }
    }

    fn page() -> (Document, crate::dom::NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let loading = doc.append_new(body, "div");
        doc.set_attr(loading, "id", LOADING_MESSAGE_ID);
        (doc, loading)
    }

    fn record(name: &str, file_type: &str) -> ImageRecord {
        ImageRecord::new(
            format!("https://ik.imagekit.io/demo/{name}"),
            name,
            file_type,
        )
    }

    #[tokio::test]
    async fn missing_key_blocks_without_fetching() {
        let mut source = MockAssetSource::new();
        source.expect_list_files().times(0);
        let mut cfg = config();
        cfg.api_key = None;
        let loader = GalleryLoader::new(cfg, Arc::new(source));

        let (mut doc, loading) = page();
        let mut renderer = Recorder::default();
        let outcome = loader.load(&mut doc, &mut renderer).await;

        assert!(matches!(
            outcome,
            LoadOutcome::Blocked(ConfigInvalid::MissingApiKey)
        ));
        assert_eq!(
            doc.inner_html(loading),
            "<p class=\"text-yellow-400\">⚠️ ImageKit API key not \
             configured. Please check the setup documentation.</p>"
        );
        assert!(renderer.rendered.is_none());
    }

    #[tokio::test]
    async fn missing_source_blocks_without_fetching() {
        let mut source = MockAssetSource::new();
        source.expect_list_files().times(0);
        let mut cfg = config();
        cfg.folder = None;
        let loader = GalleryLoader::new(cfg, Arc::new(source));

        let (mut doc, _) = page();
        let outcome = loader.load(&mut doc, &mut Recorder::default()).await;
        assert!(matches!(
            outcome,
            LoadOutcome::Blocked(ConfigInvalid::MissingSource)
        ));
    }

    #[tokio::test]
    async fn comma_tag_does_not_block_folder_listing() {
        let mut source = MockAssetSource::new();
        source.expect_list_files().times(1).returning(|query| {
            assert_eq!(query.path(), Some("/Photography/Coast"));
            assert!(query.tags().is_empty());
            Ok(vec![record("a.jpg", "image")])
        });
        let mut cfg = config();
        cfg.tags = vec!["a,b".into()];
        let loader = GalleryLoader::new(cfg, Arc::new(source));

        let (mut doc, _) = page();
        let outcome = loader.load(&mut doc, &mut Recorder::default()).await;
        assert!(matches!(outcome, LoadOutcome::Rendered { count: 1 }));
    }

    #[tokio::test]
    async fn rejected_request_shows_status() {
        let mut source = MockAssetSource::new();
        source
            .expect_list_files()
            .with(always())
            .times(1)
            .returning(|_| {
                Err(FetchError::Status {
                    status: 403,
                    body: r#"{"message":"Forbidden"}"#.into(),
                })
            });
        let loader = GalleryLoader::new(config(), Arc::new(source));

        let (mut doc, loading) = page();
        let mut renderer = Recorder::default();
        let outcome = loader.load(&mut doc, &mut renderer).await;

        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert_eq!(
            doc.inner_html(loading),
            "<p class=\"text-red-400\">Failed to load album images: \
             API request failed: 403</p>"
        );
        assert!(renderer.rendered.is_none());
    }

    #[tokio::test]
    async fn no_images_after_filtering_is_empty() {
        let mut source = MockAssetSource::new();
        source.expect_list_files().returning(|_| {
            Ok(vec![
                record("notes.pdf", "non-image"),
                record("clip.mp4", "image"),
            ])
        });
        let loader = GalleryLoader::new(config(), Arc::new(source));

        let (mut doc, loading) = page();
        let mut renderer = Recorder::default();
        let outcome = loader.load(&mut doc, &mut renderer).await;

        assert!(matches!(outcome, LoadOutcome::Empty));
        assert_eq!(
            doc.inner_html(loading),
            "<p class=\"text-white\">No images found in this album.</p>"
        );
        assert!(renderer.rendered.is_none());
    }

    #[tokio::test]
    async fn success_hides_indicator_and_renders_filtered() {
        let mut source = MockAssetSource::new();
        source.expect_list_files().times(1).returning(|query| {
            assert_eq!(query.path(), Some("/Photography/Coast"));
            Ok(vec![
                record("b.JPG", "image"),
                record("readme.txt", "non-image"),
                record("a.webp", "image"),
            ])
        });
        let loader = GalleryLoader::new(config(), Arc::new(source));

        let (mut doc, loading) = page();
        let mut renderer = Recorder::default();
        let outcome = loader.load(&mut doc, &mut renderer).await;

        assert!(matches!(outcome, LoadOutcome::Rendered { count: 2 }));
        assert_eq!(doc.style(loading, "display"), Some("none"));
        let names: Vec<_> = renderer
            .rendered
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["b.JPG", "a.webp"]);
    }

    #[tokio::test]
    async fn imagekit_loader_without_key_is_blocked() {
        let mut cfg = config();
        cfg.api_key = None;
        let loader = GalleryLoader::imagekit(cfg).unwrap();
        let err = loader.fetch_images().await.unwrap_err();
        assert!(matches!(
            err,
            GalleryError::Config(ConfigInvalid::MissingApiKey)
        ));
    }
}
