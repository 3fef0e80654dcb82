mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./photoforge.toml",
        "./config.toml",
        "~/.config/photoforge/config.toml",
        "/etc/photoforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.batch.page_size == 0 {
        anyhow::bail!("Batch page size cannot be 0");
    }

    if config.storage.timeout_secs == 0 {
        anyhow::bail!("Storage timeout cannot be 0");
    }

    let factors = [
        ("contrast", config.enhance.contrast),
        ("sharpness", config.enhance.sharpness),
        ("brightness", config.enhance.brightness),
        ("color", config.enhance.color),
    ];
    for (name, factor) in factors {
        if !factor.is_finite() || factor < 0.0 {
            anyhow::bail!("Enhancement factor '{}' must be non-negative, got {}", name, factor);
        }
    }

    Ok(())
}
