/// Core error types for the Aria engine
use crate::types::{AlbumId, TrackId};
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type shared across engine crates
#[derive(Error, Debug)]
pub enum CoreError {
    /// Metadata parsing errors
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Artwork extraction errors
    #[error("Artwork error: {0}")]
    Artwork(String),

    /// Audio decoding/playback errors
    #[error("Audio error: {0}")]
    Audio(String),

    /// Track not found
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Album not found
    #[error("Album not found: {0}")]
    AlbumNotFound(AlbumId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl CoreError {
    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Create an artwork error
    pub fn artwork(msg: impl Into<String>) -> Self {
        Self::Artwork(msg.into())
    }

    /// Create an audio error
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
