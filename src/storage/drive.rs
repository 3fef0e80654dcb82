use crate::config::StorageConfig;
use crate::storage::StorageClient;

use async_trait::async_trait;
use bytes::Bytes;
use photoforge_common::{Error, ItemMeta, Result};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

/// Drive-style REST client: `files` listing, `alt=media` downloads, and
/// `multipart/related` uploads.
pub struct DriveClient {
    client: Client,
    base_url: String,
    upload_base_url: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<ItemMeta>,
}

impl DriveClient {
    /// Create a client from the storage configuration.
    pub fn new(config: &StorageConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            upload_base_url: config.upload_base_url.trim_end_matches('/').to_string(),
            token: config.token(),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl StorageClient for DriveClient {
    async fn list(&self, folder_id: &str, page_size: usize) -> Result<Vec<ItemMeta>> {
        let query = format!(
            "'{}' in parents and trashed=false",
            folder_id.replace('\'', "\\'")
        );
        let page_size_param = page_size.to_string();
        let response = self
            .authorize(self.client.get(format!("{}/files", self.base_url)))
            .query(&[
                ("q", query.as_str()),
                ("pageSize", page_size_param.as_str()),
                ("fields", "files(id,name,mimeType)"),
            ])
            .send()
            .await
            .map_err(|e| Error::list(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::list(format!("{}: {}", status, body)));
        }

        let list: FileList = response.json().await.map_err(|e| Error::list(e.to_string()))?;
        if list.files.len() >= page_size {
            tracing::warn!(
                folder = folder_id,
                page_size,
                "listing returned a full page; results may be truncated"
            );
        }
        Ok(list.files)
    }

    async fn fetch(&self, item_id: &str) -> Result<Bytes> {
        let response = self
            .authorize(
                self.client
                    .get(format!("{}/files/{}", self.base_url, item_id)),
            )
            .query(&[("alt", "media")])
            .send()
            .await
            .map_err(|e| Error::fetch(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::fetch(format!("{}: {}", status, body)));
        }

        response.bytes().await.map_err(|e| Error::fetch(e.to_string()))
    }

    async fn create(
        &self,
        folder_id: &str,
        name: &str,
        mime_type: &str,
        data: Bytes,
    ) -> Result<ItemMeta> {
        let metadata = serde_json::json!({
            "name": name,
            "parents": [folder_id],
        });

        // multipart/related body: JSON metadata part, then the media part.
        let boundary = Uuid::new_v4().simple().to_string();
        let mut body = Vec::with_capacity(data.len() + 512);
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!("--{boundary}\r\nContent-Type: {mime_type}\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(&data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let response = self
            .authorize(self.client.post(format!("{}/files", self.upload_base_url)))
            .query(&[
                ("uploadType", "multipart"),
                ("fields", "id,name,mimeType"),
            ])
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| Error::upload(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upload(format!("{}: {}", status, body)));
        }

        response
            .json::<ItemMeta>()
            .await
            .map_err(|e| Error::upload(e.to_string()))
    }
}
