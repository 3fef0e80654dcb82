//! Batch runner: enumerate a source folder, enhance each eligible image,
//! and upload the results, accounting per-item success and failure.

use crate::storage::StorageClient;

use anyhow::{Context, Result};
use photoforge_common::{ItemMeta, MediaKind};
use photoforge_enhance::Enhancer;
use std::sync::Arc;

/// A single item's failure, preserved for the final report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    /// Display name of the item, or `"Unknown"`.
    pub name: String,
    /// Message of the error that stopped the item.
    pub reason: String,
}

/// Accumulated outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Items fetched, enhanced, and uploaded successfully.
    pub processed: usize,
    /// Items that failed at any step.
    pub failed: usize,
    /// One entry per failed item, in processing order.
    pub failures: Vec<ItemFailure>,
}

impl BatchOutcome {
    /// Number of eligible items considered.
    pub fn total(&self) -> usize {
        self.processed + self.failed
    }
}

/// Runs a batch of fetch → enhance → upload over a source folder.
pub struct BatchRunner {
    client: Arc<dyn StorageClient>,
    enhancer: Enhancer,
    page_size: usize,
}

impl BatchRunner {
    pub fn new(client: Arc<dyn StorageClient>, enhancer: Enhancer, page_size: usize) -> Self {
        Self {
            client,
            enhancer,
            page_size,
        }
    }

    /// List the source folder and filter to eligible images.
    ///
    /// Items without a recognized image mime type are dropped here without
    /// being counted anywhere. A listing failure propagates to the caller.
    pub async fn preview(&self, source_folder: &str) -> Result<Vec<(ItemMeta, MediaKind)>> {
        let listed = self
            .client
            .list(source_folder, self.page_size)
            .await
            .with_context(|| format!("Failed to list source folder {source_folder}"))?;

        let total = listed.len();
        let eligible: Vec<_> = listed
            .into_iter()
            .filter_map(|item| match item.media_kind() {
                Some(kind) => Some((item, kind)),
                None => {
                    tracing::debug!(item = item.display_name(), "skipping non-image item");
                    None
                }
            })
            .collect();

        tracing::info!(total, eligible = eligible.len(), "listed source folder");
        Ok(eligible)
    }

    /// Run the batch: fetch, enhance, and upload every eligible item in
    /// listing order, one at a time.
    ///
    /// Only the initial listing is fatal. Every per-item failure is
    /// recorded in the outcome and the run continues with the next item.
    pub async fn run(&self, source_folder: &str, target_folder: &str) -> Result<BatchOutcome> {
        let eligible = self.preview(source_folder).await?;

        let mut outcome = BatchOutcome::default();
        if eligible.is_empty() {
            tracing::info!("no eligible images to process");
            return Ok(outcome);
        }

        for (index, (item, kind)) in eligible.iter().enumerate() {
            let name = item.display_name();
            tracing::info!(item = name, "processing {}/{}", index + 1, eligible.len());

            match self.process_item(item, *kind, target_folder).await {
                Ok(()) => outcome.processed += 1,
                Err(e) => {
                    tracing::warn!(item = name, error = %e, "item failed");
                    outcome.failed += 1;
                    outcome.failures.push(ItemFailure {
                        name: name.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(outcome)
    }

    /// Fetch, enhance, and upload a single item. The enhanced image keeps
    /// the original display name and mime type.
    async fn process_item(
        &self,
        item: &ItemMeta,
        kind: MediaKind,
        target_folder: &str,
    ) -> Result<()> {
        let data = self.client.fetch(&item.id).await?;
        let enhanced = self.enhancer.process(&data)?;
        self.client
            .create(target_folder, item.display_name(), kind.mime(), enhanced.into())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use photoforge_common::ItemMeta;
    use photoforge_enhance::EnhanceSettings;
    use std::io::Cursor;

    const SRC: &str = "source-folder";
    const DST: &str = "target-folder";

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_fn(6, 6, |x, y| Rgba([(x * 40) as u8, (y * 40) as u8, 60, 255]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    fn jpeg_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(6, 6, Rgba([120, 80, 40, 255]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .into_rgb8()
            .write_to(&mut buf, ImageFormat::Jpeg)
            .unwrap();
        buf.into_inner()
    }

    fn runner(storage: &Arc<MemoryStorage>) -> BatchRunner {
        BatchRunner::new(
            storage.clone() as Arc<dyn StorageClient>,
            Enhancer::new(EnhanceSettings::default()),
            1000,
        )
    }

    #[tokio::test]
    async fn test_empty_folder_returns_empty_outcome() {
        let storage = Arc::new(MemoryStorage::new());
        let outcome = runner(&storage).run(SRC, DST).await.unwrap();
        assert_eq!(outcome, BatchOutcome::default());
        assert!(storage.create_calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_image_items_filtered_silently() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(SRC, "a.jpg", "image/jpeg", jpeg_bytes());
        storage.seed(SRC, "notes.pdf", "application/pdf", &b"%PDF-1.4"[..]);
        storage.seed(SRC, "b.png", "image/png", png_bytes());

        let outcome = runner(&storage).run(SRC, DST).await.unwrap();
        assert_eq!(outcome.processed, 2);
        assert_eq!(outcome.failed, 0);
        assert!(outcome.failures.is_empty());
        // The pdf never shows up in the target folder or the create log.
        let created: Vec<_> = storage
            .create_calls()
            .into_iter()
            .map(|(_, name)| name)
            .collect();
        assert_eq!(created, vec!["a.jpg", "b.png"]);
    }

    #[tokio::test]
    async fn test_outcome_invariant_holds_with_mixed_results() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(SRC, "good.png", "image/png", png_bytes());
        storage.seed(SRC, "broken.png", "image/png", &b"not an image"[..]);
        let bad_fetch = storage.seed(SRC, "gone.jpg", "image/jpeg", jpeg_bytes());
        storage.fail_fetch_for(&bad_fetch.id);

        let outcome = runner(&storage).run(SRC, DST).await.unwrap();
        assert_eq!(outcome.processed, 1);
        assert_eq!(outcome.failed, 2);
        assert_eq!(outcome.total(), 3);
        assert_eq!(outcome.failures.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_recorded_and_no_create() {
        let storage = Arc::new(MemoryStorage::new());
        let meta = storage.seed(SRC, "photo.png", "image/png", png_bytes());
        storage.fail_fetch_for(&meta.id);

        let outcome = runner(&storage).run(SRC, DST).await.unwrap();
        assert_eq!(outcome.processed, 0);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].name, "photo.png");
        assert!(outcome.failures[0].reason.contains("Fetch failed"));
        assert!(storage.create_calls().is_empty());
    }

    #[tokio::test]
    async fn test_decode_failure_recorded_and_no_create() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(SRC, "a.png", "image/png", &b"garbage bytes"[..]);

        let outcome = runner(&storage).run(SRC, DST).await.unwrap();
        assert_eq!(outcome.processed, 0);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.failures[0].name, "a.png");
        assert!(outcome.failures[0].reason.contains("decode"));
        assert!(storage.create_calls().is_empty());
    }

    #[tokio::test]
    async fn test_encode_failure_recorded_and_no_create() {
        // An EXR payload decodes fine but cannot be re-encoded from the
        // 8-bit working buffer, so the item fails at the encode step.
        let storage = Arc::new(MemoryStorage::new());
        let img = image::Rgb32FImage::from_pixel(4, 4, image::Rgb([0.5, 0.5, 0.5]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb32F(img)
            .write_to(&mut buf, ImageFormat::OpenExr)
            .unwrap();
        storage.seed(SRC, "a.png", "image/png", buf.into_inner());

        let outcome = runner(&storage).run(SRC, DST).await.unwrap();
        assert_eq!(outcome.processed, 0);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.failures[0].name, "a.png");
        assert!(outcome.failures[0].reason.contains("encode"));
        assert!(storage.create_calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_failure_recorded_and_run_continues() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(SRC, "first.png", "image/png", png_bytes());
        storage.seed(SRC, "second.png", "image/png", png_bytes());
        storage.fail_create_in(DST);

        let outcome = runner(&storage).run(SRC, DST).await.unwrap();
        assert_eq!(outcome.processed, 0);
        assert_eq!(outcome.failed, 2);
        assert!(outcome.failures[0].reason.contains("Upload failed"));
        // Both items were attempted despite the first failing.
        assert_eq!(outcome.failures[1].name, "second.png");
    }

    #[tokio::test]
    async fn test_list_failure_is_fatal() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(SRC, "a.png", "image/png", png_bytes());
        storage.fail_list();

        let result = runner(&storage).run(SRC, DST).await;
        assert!(result.is_err());
        assert!(storage.create_calls().is_empty());
    }

    #[tokio::test]
    async fn test_nameless_item_failure_reported_as_unknown() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed_meta(
            SRC,
            ItemMeta {
                id: "nameless".to_string(),
                name: None,
                mime_type: Some("image/png".to_string()),
            },
            &b"broken"[..],
        );

        let outcome = runner(&storage).run(SRC, DST).await.unwrap();
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.failures[0].name, "Unknown");
    }

    #[tokio::test]
    async fn test_enhanced_item_keeps_name_and_mime() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(SRC, "photo.png", "image/png", png_bytes());

        let outcome = runner(&storage).run(SRC, DST).await.unwrap();
        assert_eq!(outcome.processed, 1);

        let created = storage.items(DST);
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].display_name(), "photo.png");
        assert_eq!(created[0].mime_type.as_deref(), Some("image/png"));

        // The uploaded payload is a decodable PNG, not the original bytes.
        let uploaded = storage.data(&created[0].id).unwrap();
        assert_ne!(&uploaded[..], &png_bytes()[..]);
        assert_eq!(
            image::guess_format(&uploaded).unwrap(),
            image::ImageFormat::Png
        );
    }

    #[tokio::test]
    async fn test_items_processed_in_listing_order() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(SRC, "1.png", "image/png", png_bytes());
        storage.seed(SRC, "2.png", "image/png", png_bytes());
        storage.seed(SRC, "3.png", "image/png", png_bytes());

        runner(&storage).run(SRC, DST).await.unwrap();
        let created: Vec<_> = storage
            .create_calls()
            .into_iter()
            .map(|(_, name)| name)
            .collect();
        assert_eq!(created, vec!["1.png", "2.png", "3.png"]);
    }

    #[tokio::test]
    async fn test_preview_does_not_touch_items() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed(SRC, "a.png", "image/png", png_bytes());
        storage.seed(SRC, "doc.pdf", "application/pdf", &b"%PDF"[..]);

        let eligible = runner(&storage).preview(SRC).await.unwrap();
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].0.display_name(), "a.png");
        assert_eq!(eligible[0].1, MediaKind::Png);
        assert!(storage.create_calls().is_empty());
    }

    #[tokio::test]
    async fn test_page_size_caps_listing() {
        let storage = Arc::new(MemoryStorage::new());
        for i in 0..4 {
            storage.seed(SRC, &format!("{i}.png"), "image/png", png_bytes());
        }
        let capped = BatchRunner::new(
            storage.clone() as Arc<dyn StorageClient>,
            Enhancer::new(EnhanceSettings::default()),
            2,
        );
        let outcome = capped.run(SRC, DST).await.unwrap();
        assert_eq!(outcome.total(), 2);
    }
}
