use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A file query named neither a folder nor any tag.
    EmptyQuery,
    InvalidTag(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptyQuery => {
                write!(f, "file query needs a folder path or at least one tag")
            }
            ModelError::InvalidTag(tag) => write!(f, "invalid tag: {tag:?}"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
