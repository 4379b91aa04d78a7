// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Settings management for Easel
//!
//! Handles loading settings from `~/.easel/settings.toml`. Every field is
//! defaulted, and a missing or invalid file degrades to the defaults with
//! a warning: the catalog must come up even on a fresh machine.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::source::REPLICATE_BASE_URL;
use crate::catalog::{CatalogService, HttpCatalogSource};
use crate::error::Result;

/// Main settings structure, stored in ~/.easel/settings.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Catalog source and cache configuration
    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// Configuration for the model catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Base URL of the model-hosting API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Environment variable holding the API token
    #[serde(default = "default_api_token_env")]
    pub api_token_env: String,

    /// Collection slug to fetch
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Cache time-to-live in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Network timeout for a refresh, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Optional curated summary snapshot to merge on refresh
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_snapshot_path: Option<PathBuf>,
}

fn default_api_base() -> String {
    REPLICATE_BASE_URL.to_string()
}

fn default_api_token_env() -> String {
    "REPLICATE_API_TOKEN".to_string()
}

fn default_collection() -> String {
    "text-to-image".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    60 * 60
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_token_env: default_api_token_env(),
            collection: default_collection(),
            cache_ttl_secs: default_cache_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            summary_snapshot_path: None,
        }
    }
}

impl Settings {
    /// Get the default settings file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".easel/settings.toml"))
    }

    /// Load settings from the default location, degrading to defaults
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from an explicit path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Build a catalog service from these settings. The API token is read
    /// from the configured environment variable; absent means anonymous.
    pub fn catalog_service(&self) -> Result<CatalogService> {
        let c = &self.catalog;
        let token = std::env::var(&c.api_token_env).ok();
        let source = HttpCatalogSource::with_timeout(
            c.api_base.clone(),
            c.collection.clone(),
            token,
            Duration::from_secs(c.request_timeout_secs),
        )?;

        let mut service = CatalogService::new(Arc::new(source))
            .with_ttl(Duration::from_secs(c.cache_ttl_secs));
        if let Some(path) = &c.summary_snapshot_path {
            service = service.with_summary_snapshot(path.clone());
        }
        Ok(service)
    }
}
