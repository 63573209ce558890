/// Error types shared by the storage, platform, dispatcher and REST layers

use crate::extraction::ExtractionFailure;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing extension storage failed.
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// A browser API call (tabs, windows, bookmarks, scripting) rejected.
    #[error("Browser API error: {message}")]
    Platform { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid folder name: {name:?}")]
    InvalidFolderName { name: String },

    #[error("Action {action} requires a windowId")]
    MissingWindowId { action: &'static str },

    #[error("Content extraction failed: {0}")]
    Extraction(#[from] ExtractionFailure),

    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Request never reached the backend, or the body was unreadable.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 2xx answer whose envelope says `success: false` or carries no data
    #[error("Backend rejected request: {message}")]
    Rejected { message: String },

    #[error("{what} not found")]
    NotFound { what: String },
}

impl Error {
    pub fn storage(message: impl Into<String>) -> Self {
        Error::Storage {
            message: message.into(),
        }
    }

    pub fn platform(message: impl Into<String>) -> Self {
        Error::Platform {
            message: message.into(),
        }
    }
}
