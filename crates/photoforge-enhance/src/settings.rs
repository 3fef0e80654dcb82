//! Enhancement strength settings.

use serde::{Deserialize, Serialize};

/// Strength factors for the enhancement pipeline, applied in the order
/// contrast, sharpness, brightness, color. A factor of 1.0 means no change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceSettings {
    /// Contrast scaling around the per-image mean.
    pub contrast: f32,
    /// Unsharp-style edge enhancement.
    pub sharpness: f32,
    /// Linear brightness scaling.
    pub brightness: f32,
    /// Saturation blend; skipped for CMYK sources.
    pub color: f32,
}

impl Default for EnhanceSettings {
    fn default() -> Self {
        Self {
            contrast: 1.3,
            sharpness: 1.5,
            brightness: 1.1,
            color: 1.2,
        }
    }
}
