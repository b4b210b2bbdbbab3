//! Remote asset listing.

pub mod imagekit;

use async_trait::async_trait;
use vitrine_model::{FileQuery, ImageRecord};

use crate::error::FetchError;

pub use imagekit::ImageKitClient;

/// Anything that can list the files of an album.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Return every file matching `query`, unfiltered and in host order.
    async fn list_files(
        &self,
        query: &FileQuery,
    ) -> Result<Vec<ImageRecord>, FetchError>;
}
