use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, warn};
use url::Url;
use vitrine_config::{ApiKey, GalleryConfig};
use vitrine_model::{FileQuery, ImageRecord};

use super::AssetSource;
use crate::error::FetchError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the ImageKit file listing endpoint.
#[derive(Clone)]
pub struct ImageKitClient {
    client: Client,
    endpoint: Url,
    api_key: ApiKey,
}

impl fmt::Debug for ImageKitClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageKitClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("has_api_key", &true)
            .finish()
    }
}

impl ImageKitClient {
    pub fn new(endpoint: Url, api_key: ApiKey) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Build a client for `config`; `None` when no usable API key is
    /// configured.
    pub fn from_config(
        config: &GalleryConfig,
    ) -> Result<Option<Self>, FetchError> {
        config
            .api_key
            .clone()
            .map(|key| Self::new(config.endpoint.clone(), key))
            .transpose()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Listing URL for `query`. Folders are never included in results.
    pub fn request_url(&self, query: &FileQuery) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(path) = query.path() {
                pairs.append_pair("path", path);
            }
            if let Some(tags) = query.tags_param() {
                pairs.append_pair("tags", &tags);
            }
            pairs.append_pair("includeFolder", "false");
        }
        url
    }

    /// HTTP Basic credentials: the private key as user, empty password.
    pub fn authorization(&self) -> String {
        let token = STANDARD.encode(format!("{}:", self.api_key.expose()));
        format!("Basic {token}")
    }
}

#[async_trait]
impl AssetSource for ImageKitClient {
    async fn list_files(
        &self,
        query: &FileQuery,
    ) -> Result<Vec<ImageRecord>, FetchError> {
        let url = self.request_url(query);
        debug!(url = %url, "requesting file listing");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, self.authorization())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "file listing request rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let files: Vec<ImageRecord> = serde_json::from_slice(&bytes)?;
        debug!(count = files.len(), "file listing received");
        Ok(files)
    }
}
