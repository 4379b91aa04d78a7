// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Requirement spec
//!
//! The structured expression of what the caller wants from a generated
//! image, produced by an upstream LLM refinement phase. Every field is
//! optional in the serde sense: an absent field stays neutral during
//! scoring and never penalizes a candidate.

use serde::{Deserialize, Serialize};

use crate::catalog::QualityLevel;

/// Caller's speed preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedPreference {
    /// Speed matters; favor fast models
    #[serde(rename = "fast")]
    Fast,

    /// Explicitly quality-first; fast models lose a little
    #[serde(rename = "no")]
    QualityPriority,

    /// No stated preference
    #[default]
    #[serde(other, rename = "unset")]
    Unset,
}

/// Desiderata for model selection, authored upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementSpec {
    /// Caller will supply reference images
    #[serde(default)]
    pub needs_reference_images: bool,

    /// Minimum acceptable quality, compared against the summary's
    /// detail/prompt-following profile
    #[serde(default)]
    pub min_quality: Option<QualityLevel>,

    /// Requested styles, matched against summary style strengths
    #[serde(default)]
    pub style_focus: Vec<String>,

    #[serde(default)]
    pub speed_preference: SpeedPreference,

    /// Free-text model hint matched against id/name/owner
    #[serde(default)]
    pub preferred_model: Option<String>,

    /// What the image is for, matched against best-for/not-good-for
    #[serde(default)]
    pub use_case: Option<String>,

    /// Anything else the caller called out (e.g. "legible text")
    #[serde(default)]
    pub special_needs: Vec<String>,

    /// Requested aspect ratio (e.g. "16:9")
    #[serde(default)]
    pub aspect_ratio: Option<String>,
}
