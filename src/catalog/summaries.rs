// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Summary snapshot loader
//!
//! Curated model summaries are produced by an out-of-scope summarization job
//! and stored as a JSON document on disk. This module reads that document
//! and merges its summaries onto freshly refreshed descriptors, keyed by
//! full model name. A missing or corrupt snapshot degrades to "no
//! summaries" with a warning; it never blocks a refresh.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::schema::{ModelDescriptor, ModelSummary};
use crate::error::Result;

/// On-disk snapshot document: `{ "generatedAt": ..., "models": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarySnapshot {
    pub generated_at: DateTime<Utc>,

    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
}

impl SummarySnapshot {
    /// Load and parse a snapshot file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: SummarySnapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    /// Load a snapshot, degrading to `None` with a warning on any failure
    pub fn load_or_none(path: &Path) -> Option<Self> {
        match Self::load(path) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "summary snapshot unavailable");
                None
            }
        }
    }

    /// Index the snapshot's summaries by full model name
    pub fn summary_index(&self) -> HashMap<String, ModelSummary> {
        self.models
            .iter()
            .filter_map(|m| {
                m.summary
                    .as_ref()
                    .map(|s| (m.full_name.clone(), s.clone()))
            })
            .collect()
    }
}

/// Merge snapshot summaries onto descriptors in place. Models without an
/// entry keep whatever summary they already carry.
pub fn apply_summaries(models: &mut [ModelDescriptor], index: &HashMap<String, ModelSummary>) {
    for model in models.iter_mut() {
        if let Some(summary) = index.get(&model.full_name) {
            model.summary = Some(summary.clone());
        }
    }
}
