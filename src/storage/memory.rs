use crate::storage::StorageClient;

use async_trait::async_trait;
use bytes::Bytes;
use photoforge_common::{Error, ItemMeta, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

/// In-memory storage backend.
///
/// Holds folders of items behind a mutex, mints uuid item ids, and offers
/// failure injection for every operation so the batch runner's error paths
/// can be exercised without a network.
#[derive(Default)]
pub struct MemoryStorage {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    folders: HashMap<String, Vec<ItemMeta>>,
    blobs: HashMap<String, Bytes>,
    fail_list: bool,
    fail_fetch: HashSet<String>,
    fail_create: HashSet<String>,
    create_calls: Vec<(String, String)>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an item into a folder, returning its minted metadata.
    pub fn seed(
        &self,
        folder_id: &str,
        name: &str,
        mime_type: &str,
        data: impl Into<Bytes>,
    ) -> ItemMeta {
        let meta = ItemMeta {
            id: Uuid::new_v4().to_string(),
            name: Some(name.to_string()),
            mime_type: Some(mime_type.to_string()),
        };
        self.seed_meta(folder_id, meta.clone(), data);
        meta
    }

    /// Seed a pre-built `ItemMeta`, e.g. one without a name or mime type.
    pub fn seed_meta(&self, folder_id: &str, meta: ItemMeta, data: impl Into<Bytes>) {
        let mut inner = self.inner.lock().unwrap();
        inner.blobs.insert(meta.id.clone(), data.into());
        inner
            .folders
            .entry(folder_id.to_string())
            .or_default()
            .push(meta);
    }

    /// Make every `list` call fail.
    pub fn fail_list(&self) {
        self.inner.lock().unwrap().fail_list = true;
    }

    /// Make `fetch` fail for the given item id.
    pub fn fail_fetch_for(&self, item_id: &str) {
        self.inner.lock().unwrap().fail_fetch.insert(item_id.to_string());
    }

    /// Make `create` fail for the given folder id.
    pub fn fail_create_in(&self, folder_id: &str) {
        self.inner
            .lock()
            .unwrap()
            .fail_create
            .insert(folder_id.to_string());
    }

    /// Items currently listed in a folder.
    pub fn items(&self, folder_id: &str) -> Vec<ItemMeta> {
        self.inner
            .lock()
            .unwrap()
            .folders
            .get(folder_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Payload of an item by id.
    pub fn data(&self, item_id: &str) -> Option<Bytes> {
        self.inner.lock().unwrap().blobs.get(item_id).cloned()
    }

    /// Every `create` call attempted so far, as (folder, name) pairs in
    /// call order, including calls that were injected to fail.
    pub fn create_calls(&self) -> Vec<(String, String)> {
        self.inner.lock().unwrap().create_calls.clone()
    }
}

#[async_trait]
impl StorageClient for MemoryStorage {
    async fn list(&self, folder_id: &str, page_size: usize) -> Result<Vec<ItemMeta>> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_list {
            return Err(Error::list("injected list failure"));
        }
        Ok(inner
            .folders
            .get(folder_id)
            .map(|items| items.iter().take(page_size).cloned().collect())
            .unwrap_or_default())
    }

    async fn fetch(&self, item_id: &str) -> Result<Bytes> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_fetch.contains(item_id) {
            return Err(Error::fetch(format!("injected fetch failure: {item_id}")));
        }
        inner
            .blobs
            .get(item_id)
            .cloned()
            .ok_or_else(|| Error::fetch(format!("no such item: {item_id}")))
    }

    async fn create(
        &self,
        folder_id: &str,
        name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> Result<ItemMeta> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .create_calls
            .push((folder_id.to_string(), name.to_string()));
        if inner.fail_create.contains(folder_id) {
            return Err(Error::upload(format!("injected create failure: {folder_id}")));
        }
        let meta = ItemMeta {
            id: Uuid::new_v4().to_string(),
            name: Some(name.to_string()),
            mime_type: Some(mime_type.to_string()),
        };
        inner.blobs.insert(meta.id.clone(), data);
        inner
            .folders
            .entry(folder_id.to_string())
            .or_default()
            .push(meta.clone());
        Ok(meta)
    }
}
