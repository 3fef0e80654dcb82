//! Storage backends: listing, fetching, and creating items in folders.
//!
//! The batch runner only talks to the [`StorageClient`] trait, so it can be
//! exercised against [`MemoryStorage`] in tests while production runs go
//! through [`DriveClient`].

mod drive;
mod memory;

pub use drive::DriveClient;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use bytes::Bytes;
use photoforge_common::{ItemMeta, Result};

/// Client for a folder-of-items storage backend.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// List non-trashed items in a folder.
    ///
    /// Only the first page of results is returned, capped at `page_size`;
    /// a folder holding more items than the cap is silently truncated.
    async fn list(&self, folder_id: &str, page_size: usize) -> Result<Vec<ItemMeta>>;

    /// Fetch an item's raw bytes by id.
    async fn fetch(&self, item_id: &str) -> Result<Bytes>;

    /// Create a new item in a folder with the given payload and metadata.
    async fn create(
        &self,
        folder_id: &str,
        name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> Result<ItemMeta>;
}
