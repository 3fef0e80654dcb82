//! Photoforge-Common: Shared types and errors.
//!
//! This crate provides common functionality used across photoforge:
//!
//! - **Core Types**: Item metadata as returned by the storage backend and
//!   the enumeration of recognized image media types
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use photoforge_common::{Error, MediaKind, Result};
//!
//! // Work with media kinds
//! assert_eq!(MediaKind::from_mime("image/png"), Some(MediaKind::Png));
//! assert_eq!(MediaKind::Png.mime(), "image/png");
//!
//! // Use common error types
//! fn example() -> Result<()> {
//!     Err(Error::fetch("connection reset"))
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
