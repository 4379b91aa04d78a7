// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Model catalog system
//!
//! Maintains the set of known image-generation models with derived
//! capabilities. The pipeline for a live refresh is:
//!
//! 1. Fetch raw records from the collection source (`source`)
//! 2. Keep official entries recognized as image-generation models
//!    (`classify::is_image_generation_model`)
//! 3. Normalize each record's parameter schema (`extract`)
//! 4. Derive capabilities from the normalized schema (`classify`)
//! 5. Merge curated summaries from the snapshot file (`summaries`)
//! 6. Swap the complete snapshot into the cache (`service`)
//!
//! When the source is unreachable the service answers from a built-in
//! fallback list (`fallback`) instead; fetch errors never reach callers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use easel::catalog::{CatalogService, HttpCatalogSource, REPLICATE_BASE_URL};
//!
//! let source = HttpCatalogSource::new(REPLICATE_BASE_URL, "text-to-image", None)?;
//! let catalog = CatalogService::new(Arc::new(source));
//!
//! let all = catalog.get_models().await;
//! let single_ref = catalog.get_models_for_references(1).await;
//! let model = catalog.require_model("black-forest-labs/flux-dev").await?;
//! ```

pub mod classify;
pub mod extract;
pub mod fallback;
pub mod schema;
pub mod service;
pub mod source;
pub mod summaries;

// Re-export commonly used types
pub use classify::{classify_capabilities, is_image_generation_model};
pub use extract::extract_schema;
pub use fallback::fallback_models;
pub use schema::{
    InputSchema, ModelCapabilities, ModelDescriptor, ModelSummary, ParamType,
    ParameterDescriptor, QualityLevel, QualityProfile, SpeedLevel,
};
pub use service::{CatalogService, CatalogSnapshot, CATALOG_TTL};
pub use source::{CatalogSource, HttpCatalogSource, RawModelRecord, REPLICATE_BASE_URL};
pub use summaries::SummarySnapshot;
