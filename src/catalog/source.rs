// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Catalog source
//!
//! Fetches raw model records from an external model-hosting API. The wire
//! shape is owned by the provider and treated as untrusted: every field the
//! upstream may omit is defaulted, and the nested OpenAPI input schema is
//! carried as an opaque JSON value for the extractor to normalize.
//!
//! The `CatalogSource` trait is the seam the catalog service depends on, so
//! tests can swap the live HTTP source for an in-memory one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::error::{EaselError, Result};

/// Canonical base URL of the default model-hosting API
pub const REPLICATE_BASE_URL: &str = "https://api.replicate.com/v1";

/// Default network timeout for a catalog refresh. Bounded and short: on
/// expiry the service falls back to the built-in model list.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// One raw model record as returned by the catalog source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawModelRecord {
    #[serde(default)]
    pub owner: String,

    /// Short model id (the provider calls this "name")
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub is_official: bool,

    #[serde(default)]
    pub run_count: u64,

    #[serde(default)]
    pub latest_version: Option<RawVersion>,
}

/// The latest published version of a raw model record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVersion {
    /// Full OpenAPI document describing the model's interface
    #[serde(default)]
    pub openapi_schema: Value,
}

impl RawModelRecord {
    /// The JSON-schema-like object describing the model's input parameters.
    ///
    /// The provider nests it at `components.schemas.Input` of the OpenAPI
    /// document; records without a version or without that path yield
    /// `Value::Null`, which the extractor degrades to an empty schema.
    pub fn input_schema(&self) -> Value {
        self.latest_version
            .as_ref()
            .and_then(|v| {
                v.openapi_schema
                    .pointer("/components/schemas/Input")
                    .cloned()
            })
            .unwrap_or(Value::Null)
    }
}

/// Response envelope of the collection endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionResponse {
    #[serde(default)]
    pub models: Vec<RawModelRecord>,
}

/// Seam between the catalog service and whatever supplies raw records
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the named collection's raw model records.
    ///
    /// Errors are recovered by the caller (fallback list); implementations
    /// should not retry internally.
    async fn fetch_collection(&self) -> Result<Vec<RawModelRecord>>;
}

/// Live HTTP source against a Replicate-style collection endpoint
pub struct HttpCatalogSource {
    client: reqwest::Client,
    base_url: String,
    collection: String,
    api_token: Option<String>,
}

impl HttpCatalogSource {
    /// Create a source for `{base_url}/collections/{collection}`
    pub fn new(
        base_url: impl Into<String>,
        collection: impl Into<String>,
        api_token: Option<String>,
    ) -> Result<Self> {
        Self::with_timeout(base_url, collection, api_token, DEFAULT_FETCH_TIMEOUT)
    }

    /// Create a source with an explicit network timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        collection: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            collection: collection.into(),
            api_token,
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_collection(&self) -> Result<Vec<RawModelRecord>> {
        let url = format!(
            "{}/collections/{}",
            self.base_url.trim_end_matches('/'),
            self.collection
        );

        let mut request = self.client.get(&url);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EaselError::Catalog(format!(
                "collection fetch failed with status {}",
                status
            )));
        }

        let body: CollectionResponse = response.json().await?;
        tracing::debug!(
            collection = %self.collection,
            models = body.models.len(),
            "fetched catalog collection"
        );
        Ok(body.models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_record_deserializes_sparse_input() {
        let record: RawModelRecord = serde_json::from_value(json!({
            "name": "flux-dev"
        }))
        .unwrap();

        assert_eq!(record.name, "flux-dev");
        assert!(record.owner.is_empty());
        assert!(!record.is_official);
        assert_eq!(record.run_count, 0);
        assert!(record.latest_version.is_none());
    }

    #[test]
    fn test_input_schema_digs_openapi_path() {
        let record: RawModelRecord = serde_json::from_value(json!({
            "owner": "black-forest-labs",
            "name": "flux-dev",
            "latest_version": {
                "openapi_schema": {
                    "components": {
                        "schemas": {
                            "Input": {
                                "properties": {
                                    "prompt": { "type": "string" }
                                }
                            }
                        }
                    }
                }
            }
        }))
        .unwrap();

        let input = record.input_schema();
        assert!(input.get("properties").is_some());
    }

    #[test]
    fn test_input_schema_missing_version_is_null() {
        let record = RawModelRecord {
            name: "bare".to_string(),
            ..Default::default()
        };
        assert!(record.input_schema().is_null());
    }

    #[test]
    fn test_input_schema_missing_path_is_null() {
        let record = RawModelRecord {
            latest_version: Some(RawVersion {
                openapi_schema: json!({ "openapi": "3.0" }),
            }),
            ..Default::default()
        };
        assert!(record.input_schema().is_null());
    }

    #[test]
    fn test_collection_response_default_models() {
        let response: CollectionResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.models.is_empty());
    }
}
