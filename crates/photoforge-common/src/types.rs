//! Core type definitions for stored items and image media types.
//!
//! This module defines the metadata shape returned by the storage backend
//! and the fixed enumeration of image media types photoforge will process.
//! Enums are serialized in lowercase.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognized image media type.
///
/// Items whose mime type falls outside this enumeration are skipped by the
/// batch runner without being counted as failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// JPEG image (`image/jpeg`).
    Jpeg,
    /// PNG image (`image/png`).
    Png,
    /// GIF image (`image/gif`).
    Gif,
    /// WebP image (`image/webp`).
    Webp,
}

impl MediaKind {
    /// Parse a mime type string into a `MediaKind`.
    ///
    /// Returns `None` for anything outside the recognized image types.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Returns the canonical mime type string for this kind.
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jpeg => write!(f, "jpeg"),
            Self::Png => write!(f, "png"),
            Self::Gif => write!(f, "gif"),
            Self::Webp => write!(f, "webp"),
        }
    }
}

/// Metadata for a single stored item, as listed by the storage backend.
///
/// `name` and `mime_type` are optional on the wire. An item without a mime
/// type is never eligible for processing; an item without a name is
/// reported under the `"Unknown"` sentinel if it fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMeta {
    /// Opaque identifier, unique within the storage backend.
    pub id: String,
    /// Display name of the item.
    #[serde(default)]
    pub name: Option<String>,
    /// Mime type as reported by the backend.
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
}

impl ItemMeta {
    /// The item's display name, or the `"Unknown"` sentinel.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// The item's media kind, if its mime type is a recognized image type.
    pub fn media_kind(&self) -> Option<MediaKind> {
        self.mime_type.as_deref().and_then(MediaKind::from_mime)
    }
}
