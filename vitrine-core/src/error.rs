use thiserror::Error;
use vitrine_config::ConfigInvalid;

/// Failure to obtain a file listing from the asset host.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("API request failed: {status}")]
    Status { status: u16, body: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid listing response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport(err) => err.status().map(|s| s.as_u16()),
            FetchError::Decode(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error(transparent)]
    Config(#[from] ConfigInvalid),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, GalleryError>;

/// Markup the widget expects on the host page is missing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("element #{0} not found")]
    MissingElement(&'static str),
}
