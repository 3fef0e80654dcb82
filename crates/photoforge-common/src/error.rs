//! Common error types used throughout photoforge.
//!
//! This module provides a unified error type covering the failure cases of
//! the storage backend: listing a folder, fetching an item's bytes, and
//! creating (uploading) a new item.

/// Common error type for photoforge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Listing the contents of a folder failed.
    #[error("Listing failed: {0}")]
    List(String),

    /// Fetching an item's bytes failed.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Creating a new item failed.
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new List error.
    pub fn list<S: Into<String>>(msg: S) -> Self {
        Self::List(msg.into())
    }

    /// Create a new Fetch error.
    pub fn fetch<S: Into<String>>(msg: S) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a new Upload error.
    pub fn upload<S: Into<String>>(msg: S) -> Self {
        Self::Upload(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
