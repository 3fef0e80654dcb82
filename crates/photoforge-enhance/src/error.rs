//! Error types for photoforge-enhance.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while enhancing an image.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input bytes could not be decoded as a supported image.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The enhanced image could not be re-encoded.
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}
