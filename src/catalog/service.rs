// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Catalog service
//!
//! Owns the single cached catalog snapshot. A read that finds the cache
//! fresh returns it as-is; a stale read triggers a live refresh that builds
//! a complete replacement snapshot and swaps it in atomically, so
//! concurrent readers never observe a partially updated catalog. Any fetch
//! failure resolves to the built-in fallback list; fetch errors never reach
//! callers.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use super::classify::{classify_capabilities, is_image_generation_model};
use super::extract::extract_schema;
use super::fallback::fallback_models;
use super::schema::ModelDescriptor;
use super::source::{CatalogSource, RawModelRecord};
use super::summaries::{apply_summaries, SummarySnapshot};
use crate::error::{EaselError, Result};

/// Cache time-to-live for a live snapshot
pub const CATALOG_TTL: Duration = Duration::from_secs(60 * 60);

/// One complete, immutable catalog snapshot
#[derive(Debug)]
pub struct CatalogSnapshot {
    fetched_at: Instant,
    pub models: Vec<ModelDescriptor>,
}

impl CatalogSnapshot {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Catalog service owning the cached snapshot and the refresh pipeline
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    ttl: Duration,
    summary_snapshot_path: Option<PathBuf>,
    cache: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl CatalogService {
    /// Create a service over the given source with the default 1 hour TTL
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            ttl: CATALOG_TTL,
            summary_snapshot_path: None,
            cache: RwLock::new(None),
        }
    }

    /// Builder: override the cache TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Builder: merge curated summaries from this snapshot file on refresh
    pub fn with_summary_snapshot(mut self, path: PathBuf) -> Self {
        self.summary_snapshot_path = Some(path);
        self
    }

    /// All models, from the fresh cache, a live refresh, or the fallback
    /// list. Never fails.
    pub async fn get_models(&self) -> Vec<ModelDescriptor> {
        self.current().await.models.clone()
    }

    /// Models filtered by how many reference images the caller will supply:
    /// `0` keeps everything (any model can at minimum do text-to-image),
    /// `1` keeps single-reference models, `>1` keeps multi-reference models.
    pub async fn get_models_for_references(&self, reference_images: usize) -> Vec<ModelDescriptor> {
        let models = self.get_models().await;
        match reference_images {
            0 => models,
            1 => models
                .into_iter()
                .filter(|m| m.capabilities.supports_single_reference)
                .collect(),
            _ => models
                .into_iter()
                .filter(|m| m.capabilities.supports_multiple_references)
                .collect(),
        }
    }

    /// Linear lookup by short id or full name
    pub async fn get_model_by_id(&self, id: &str) -> Option<ModelDescriptor> {
        self.get_models()
            .await
            .into_iter()
            .find(|m| m.id == id || m.full_name == id)
    }

    /// Lookup that maps a miss to a user-facing error
    pub async fn require_model(&self, id: &str) -> Result<ModelDescriptor> {
        self.get_model_by_id(id)
            .await
            .ok_or_else(|| EaselError::ModelNotFound(id.to_string()))
    }

    /// Case-insensitive substring search over name, description, and tags
    pub async fn search_models(&self, keyword: &str) -> Vec<ModelDescriptor> {
        let needle = keyword.to_lowercase();
        self.get_models()
            .await
            .into_iter()
            .filter(|m| {
                m.id.to_lowercase().contains(&needle)
                    || m.display_name.to_lowercase().contains(&needle)
                    || m.description.to_lowercase().contains(&needle)
                    || m.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Resolve the current snapshot: fresh cache, else refresh, else
    /// fallback
    async fn current(&self) -> Arc<CatalogSnapshot> {
        {
            let cache = self.cache.read().expect("catalog cache lock poisoned");
            if let Some(snapshot) = cache.as_ref() {
                if snapshot.is_fresh(self.ttl) {
                    return Arc::clone(snapshot);
                }
            }
        }

        // Concurrent stale readers may race here; each builds a complete
        // replacement and the last wholesale swap wins, so readers always
        // see a consistent snapshot.
        match self.refresh().await {
            Ok(snapshot) => {
                let mut cache = self.cache.write().expect("catalog cache lock poisoned");
                *cache = Some(Arc::clone(&snapshot));
                snapshot
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog refresh failed, using fallback model list");
                let mut models = fallback_models();
                self.merge_summaries(&mut models);
                // The fallback list is always available and never cached
                Arc::new(CatalogSnapshot {
                    fetched_at: Instant::now(),
                    models,
                })
            }
        }
    }

    /// Fetch the collection and build a full replacement snapshot
    async fn refresh(&self) -> Result<Arc<CatalogSnapshot>> {
        let records = self.source.fetch_collection().await?;
        let mut models = build_models(records);
        self.merge_summaries(&mut models);
        tracing::debug!(models = models.len(), "catalog snapshot refreshed");
        Ok(Arc::new(CatalogSnapshot {
            fetched_at: Instant::now(),
            models,
        }))
    }

    fn merge_summaries(&self, models: &mut [ModelDescriptor]) {
        if let Some(path) = &self.summary_snapshot_path {
            if let Some(snapshot) = SummarySnapshot::load_or_none(path) {
                apply_summaries(models, &snapshot.summary_index());
            }
        }
    }
}

/// Turn raw records into descriptors: keep official image-generation
/// models, normalize their schemas, derive capabilities, and sort by
/// popularity.
fn build_models(records: Vec<RawModelRecord>) -> Vec<ModelDescriptor> {
    let mut models: Vec<ModelDescriptor> = records
        .into_iter()
        .filter(|r| {
            r.is_official && is_image_generation_model(&r.name, &r.description, &r.tags)
        })
        .map(|r| {
            let schema = extract_schema(&r.input_schema());
            ModelDescriptor {
                full_name: format!("{}/{}", r.owner, r.name),
                display_name: r.name.clone(),
                id: r.name,
                owner: r.owner,
                description: r.description,
                run_count: r.run_count,
                is_official: r.is_official,
                tags: r.tags,
                capabilities: classify_capabilities(&schema),
                input_schema: schema,
                summary: None,
            }
        })
        .collect();

    models.sort_by(|a, b| b.run_count.cmp(&a.run_count));
    models
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::source::RawVersion;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory source for tests: serves fixed records or always fails
    struct StaticSource {
        records: Option<Vec<RawModelRecord>>,
        fetches: AtomicUsize,
    }

    impl StaticSource {
        fn serving(records: Vec<RawModelRecord>) -> Self {
            Self {
                records: Some(records),
                fetches: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                records: None,
                fetches: AtomicUsize::new(0),
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogSource for StaticSource {
        async fn fetch_collection(&self) -> Result<Vec<RawModelRecord>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.records
                .clone()
                .ok_or_else(|| EaselError::Catalog("source down".to_string()))
        }
    }

    fn record(owner: &str, name: &str, runs: u64, schema: serde_json::Value) -> RawModelRecord {
        RawModelRecord {
            owner: owner.to_string(),
            name: name.to_string(),
            description: "image generation".to_string(),
            tags: vec!["text-to-image".to_string()],
            is_official: true,
            run_count: runs,
            latest_version: Some(RawVersion {
                openapi_schema: json!({
                    "components": { "schemas": { "Input": schema } }
                }),
            }),
        }
    }

    fn text_only_schema() -> serde_json::Value {
        json!({ "properties": { "prompt": { "type": "string" } }, "required": ["prompt"] })
    }

    fn single_ref_schema() -> serde_json::Value {
        json!({
            "properties": {
                "prompt": { "type": "string" },
                "image": { "type": "string", "format": "uri" }
            }
        })
    }

    fn multi_ref_schema() -> serde_json::Value {
        json!({
            "properties": {
                "prompt": { "type": "string" },
                "image_input": { "type": "array", "format": "uri" }
            }
        })
    }

    #[tokio::test]
    async fn test_refresh_builds_sorted_catalog() {
        let source = Arc::new(StaticSource::serving(vec![
            record("a", "small-image-model", 10, text_only_schema()),
            record("b", "big-image-model", 1000, text_only_schema()),
        ]));
        let service = CatalogService::new(source);

        let models = service.get_models().await;
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].id, "big-image-model");
        assert_eq!(models[1].id, "small-image-model");
        assert!(models[0].capabilities.text_to_image);
    }

    #[tokio::test]
    async fn test_unofficial_and_non_image_records_dropped() {
        let mut unofficial = record("a", "cool-image-model", 50, text_only_schema());
        unofficial.is_official = false;

        let mut video = record("b", "video-maker", 50, text_only_schema());
        video.description = "text to video generation".to_string();
        video.tags = vec![];

        let kept = record("c", "kept-image-model", 50, text_only_schema());

        let source = Arc::new(StaticSource::serving(vec![unofficial, video, kept]));
        let service = CatalogService::new(source);

        let models = service.get_models().await;
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "kept-image-model");
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_fetch() {
        let source = Arc::new(StaticSource::serving(vec![record(
            "a",
            "image-model",
            1,
            text_only_schema(),
        )]));
        let service = CatalogService::new(Arc::clone(&source) as Arc<dyn CatalogSource>);

        service.get_models().await;
        service.get_models().await;
        service.get_models().await;
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_zero_ttl_refetches() {
        let source = Arc::new(StaticSource::serving(vec![record(
            "a",
            "image-model",
            1,
            text_only_schema(),
        )]));
        let service = CatalogService::new(Arc::clone(&source) as Arc<dyn CatalogSource>)
            .with_ttl(Duration::ZERO);

        service.get_models().await;
        service.get_models().await;
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_fallback_on_failing_source() {
        // An always-failing source still yields the non-empty fallback list
        let service = CatalogService::new(Arc::new(StaticSource::failing()));

        let models = service.get_models().await;
        assert!(!models.is_empty());
        assert!(models.iter().any(|m| m.id == "flux-schnell"));

        // Still works on repeated calls
        let again = service.get_models().await;
        assert_eq!(models.len(), again.len());
    }

    #[tokio::test]
    async fn test_reference_count_filter() {
        // 3 models, 1 single-reference capable
        let source = Arc::new(StaticSource::serving(vec![
            record("a", "text-image-model", 3, text_only_schema()),
            record("b", "ref-image-model", 2, single_ref_schema()),
            record("c", "plain-image-model", 1, text_only_schema()),
        ]));
        let service = CatalogService::new(source);

        assert_eq!(service.get_models_for_references(0).await.len(), 3);
        let single = service.get_models_for_references(1).await;
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].id, "ref-image-model");
        assert!(service.get_models_for_references(2).await.is_empty());
    }

    #[tokio::test]
    async fn test_multi_reference_filter() {
        let source = Arc::new(StaticSource::serving(vec![
            record("a", "single-ref-image", 2, single_ref_schema()),
            record("b", "multi-ref-image", 1, multi_ref_schema()),
        ]));
        let service = CatalogService::new(source);

        let multi = service.get_models_for_references(3).await;
        assert_eq!(multi.len(), 1);
        assert_eq!(multi[0].id, "multi-ref-image");
        // Array-typed inputs also serve a single reference
        assert_eq!(service.get_models_for_references(1).await.len(), 2);
    }

    #[tokio::test]
    async fn test_get_model_by_id_and_full_name() {
        let source = Arc::new(StaticSource::serving(vec![record(
            "black-forest-labs",
            "flux-image",
            1,
            text_only_schema(),
        )]));
        let service = CatalogService::new(source);

        assert!(service.get_model_by_id("flux-image").await.is_some());
        assert!(service
            .get_model_by_id("black-forest-labs/flux-image")
            .await
            .is_some());
        assert!(service.get_model_by_id("nope").await.is_none());
    }

    #[tokio::test]
    async fn test_require_model_not_found() {
        let source = Arc::new(StaticSource::serving(vec![]));
        let service = CatalogService::new(source);

        let err = service.require_model("ghost").await.unwrap_err();
        assert!(matches!(err, EaselError::ModelNotFound(_)));
    }

    #[tokio::test]
    async fn test_search_models() {
        let mut tagged = record("a", "painterly-image", 1, text_only_schema());
        tagged.tags.push("watercolor".to_string());

        let source = Arc::new(StaticSource::serving(vec![
            tagged,
            record("b", "photo-image", 1, text_only_schema()),
        ]));
        let service = CatalogService::new(source);

        assert_eq!(service.search_models("WATERCOLOR").await.len(), 1);
        assert_eq!(service.search_models("image").await.len(), 2);
        assert!(service.search_models("sculpture").await.is_empty());
    }

    #[tokio::test]
    async fn test_summary_merge_on_refresh() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "generatedAt": "2025-11-02T08:30:00Z",
                "models": [{
                    "id": "summed-image",
                    "owner": "a",
                    "fullName": "a/summed-image",
                    "summary": {
                        "oneLinePitch": "from snapshot",
                        "bestFor": [], "notGoodFor": [], "styleStrengths": [],
                        "qualityProfile": {
                            "speed": "fast", "detail": "good",
                            "coherence": "good", "promptFollowing": "good"
                        },
                        "typicalUseCase": ""
                    }
                }]
            }"#,
        )
        .unwrap();

        let source = Arc::new(StaticSource::serving(vec![record(
            "a",
            "summed-image",
            1,
            text_only_schema(),
        )]));
        let service =
            CatalogService::new(source).with_summary_snapshot(file.path().to_path_buf());

        let models = service.get_models().await;
        assert_eq!(
            models[0].summary.as_ref().unwrap().one_line_pitch,
            "from snapshot"
        );
    }
}
