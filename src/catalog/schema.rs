// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Catalog data model
//!
//! Defines the normalized shape of a candidate generation model: its input
//! parameters, derived capabilities, and the optional curated summary used
//! by the requirement scorer.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a model input parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl ParamType {
    /// Parse a JSON-schema type name, defaulting to `String` for anything
    /// unrecognized (fail-open: provider schemas are untrusted)
    pub fn parse(s: &str) -> Self {
        match s {
            "number" => ParamType::Number,
            "integer" => ParamType::Integer,
            "boolean" => ParamType::Boolean,
            "array" => ParamType::Array,
            "object" => ParamType::Object,
            _ => ParamType::String,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
        };
        write!(f, "{}", s)
    }
}

/// One normalized input field of a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    /// Declared type
    #[serde(rename = "type")]
    pub param_type: ParamType,

    /// Provider-authored description
    #[serde(default)]
    pub description: String,

    /// Whether the parameter is listed in the schema's `required` array
    #[serde(default)]
    pub required: bool,

    /// Enumerated values, order preserved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<serde_json::Value>>,

    /// Default value, if the schema declares one (falsy defaults included)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    /// Format hint (e.g. "uri")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Derived: accepts an image as input
    #[serde(default)]
    pub is_image_input: bool,

    /// Derived: inpainting mask parameter, excluded from reference-image
    /// capability detection
    #[serde(default)]
    pub is_mask: bool,
}

impl ParameterDescriptor {
    /// String-valued options, for enumerated parameters like `aspect_ratio`
    pub fn string_options(&self) -> Vec<String> {
        self.options
            .as_ref()
            .map(|opts| {
                opts.iter()
                    .filter_map(|v| v.as_str().map(|s| s.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Parameter map keyed by field name, ordered for deterministic iteration
pub type InputSchema = BTreeMap<String, ParameterDescriptor>;

/// Derived boolean/enum summary of what a model can do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCapabilities {
    /// Can generate from a text prompt alone
    pub text_to_image: bool,

    /// Accepts at least one non-mask image input
    pub image_to_image: bool,

    /// Can serve a single reference image
    pub supports_single_reference: bool,

    /// Has an array-typed image input, so accepts several references
    pub supports_multiple_references: bool,

    /// Declared aspect ratios; `["custom"]` for free width/height models,
    /// never empty
    pub supported_aspect_ratios: Vec<String>,
}

impl Default for ModelCapabilities {
    fn default() -> Self {
        Self {
            text_to_image: true,
            image_to_image: false,
            supports_single_reference: false,
            supports_multiple_references: false,
            supported_aspect_ratios: vec!["1:1".to_string()],
        }
    }
}

/// 5-level ordinal quality scale used by curated summaries and requirements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualityLevel {
    Low,
    #[default]
    Moderate,
    Good,
    VeryGood,
    Excellent,
}

impl QualityLevel {
    /// Ordinal rank, low = 1 .. excellent = 5
    pub fn rank(&self) -> u8 {
        match self {
            QualityLevel::Low => 1,
            QualityLevel::Moderate => 2,
            QualityLevel::Good => 3,
            QualityLevel::VeryGood => 4,
            QualityLevel::Excellent => 5,
        }
    }
}

/// 5-level ordinal speed scale used by curated summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedLevel {
    VerySlow,
    Slow,
    #[default]
    Moderate,
    Fast,
    VeryFast,
}

impl SpeedLevel {
    pub fn is_fast(&self) -> bool {
        matches!(self, SpeedLevel::Fast | SpeedLevel::VeryFast)
    }

    pub fn is_slow(&self) -> bool {
        matches!(self, SpeedLevel::Slow | SpeedLevel::VerySlow)
    }
}

/// Curated quality profile inside a model summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityProfile {
    #[serde(default)]
    pub speed: SpeedLevel,
    #[serde(default)]
    pub detail: QualityLevel,
    #[serde(default)]
    pub coherence: QualityLevel,
    #[serde(default)]
    pub prompt_following: QualityLevel,
}

/// Human/LLM-authored pitch for a model, merged in from the summary snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    #[serde(default)]
    pub one_line_pitch: String,

    #[serde(default)]
    pub best_for: Vec<String>,

    #[serde(default)]
    pub not_good_for: Vec<String>,

    #[serde(default)]
    pub style_strengths: Vec<String>,

    #[serde(default)]
    pub quality_profile: QualityProfile,

    #[serde(default)]
    pub typical_use_case: String,
}

/// One candidate generation model with derived capabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Short model id, unique within the catalog (e.g. "flux-dev")
    pub id: String,

    /// Owning account (e.g. "black-forest-labs")
    pub owner: String,

    /// `owner/id`
    pub full_name: String,

    /// Human-readable display name
    #[serde(default)]
    pub display_name: String,

    /// Provider-authored description
    #[serde(default)]
    pub description: String,

    /// Popularity signal from the provider
    #[serde(default)]
    pub run_count: u64,

    /// Provider-vetted flag
    #[serde(default)]
    pub is_official: bool,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Normalized input parameters
    #[serde(default)]
    pub input_schema: InputSchema,

    /// Derived from `input_schema`, never hand-edited independently
    #[serde(default)]
    pub capabilities: ModelCapabilities,

    /// Curated summary, when the snapshot has one for this model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ModelSummary>,
}

impl ModelDescriptor {
    /// Create a descriptor with empty schema and fail-open default
    /// capabilities
    pub fn new(owner: impl Into<String>, id: impl Into<String>) -> Self {
        let owner = owner.into();
        let id = id.into();
        Self {
            full_name: format!("{}/{}", owner, id),
            display_name: id.clone(),
            id,
            owner,
            description: String::new(),
            run_count: 0,
            is_official: false,
            tags: Vec::new(),
            input_schema: InputSchema::new(),
            capabilities: ModelCapabilities::default(),
            summary: None,
        }
    }

    /// Builder: set display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Builder: set run count
    pub fn with_run_count(mut self, runs: u64) -> Self {
        self.run_count = runs;
        self
    }

    /// Builder: mark official
    pub fn official(mut self) -> Self {
        self.is_official = true;
        self
    }

    /// Builder: set tags
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Builder: set the input schema and re-derive capabilities from it
    pub fn with_input_schema(mut self, schema: InputSchema) -> Self {
        self.capabilities = super::classify::classify_capabilities(&schema);
        self.input_schema = schema;
        self
    }

    /// Builder: attach a curated summary
    pub fn with_summary(mut self, summary: ModelSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Whether `needle` matches this model's id, name, owner, or full name.
    /// Case-insensitive substring; the hint is always the shorter side.
    pub fn matches_hint(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        if needle.is_empty() {
            return false;
        }
        self.id.to_lowercase().contains(&needle)
            || self.display_name.to_lowercase().contains(&needle)
            || self.owner.to_lowercase().contains(&needle)
            || self.full_name.to_lowercase().contains(&needle)
    }
}
