use photoforge_enhance::EnhanceSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub batch: BatchConfig,

    #[serde(default)]
    pub enhance: EnhanceSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Base URL of the storage API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base URL for media uploads
    #[serde(default = "default_upload_base_url")]
    pub upload_base_url: String,

    /// Bearer token for the storage API; falls back to the
    /// PHOTOFORGE_TOKEN environment variable when empty
    #[serde(default)]
    pub access_token: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            upload_base_url: default_upload_base_url(),
            access_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StorageConfig {
    /// Resolved bearer token: the configured value, or the
    /// PHOTOFORGE_TOKEN environment variable, or none.
    pub fn token(&self) -> Option<String> {
        if !self.access_token.is_empty() {
            return Some(self.access_token.clone());
        }
        std::env::var("PHOTOFORGE_TOKEN").ok().filter(|t| !t.is_empty())
    }
}

fn default_base_url() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

fn default_upload_base_url() -> String {
    "https://www.googleapis.com/upload/drive/v3".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Folder id holding the images to enhance
    #[serde(default)]
    pub source_folder: Option<String>,

    /// Folder id receiving the enhanced images
    #[serde(default)]
    pub target_folder: Option<String>,

    /// Listing cap; only the first page of results is processed
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            source_folder: None,
            target_folder: None,
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    1000
}
