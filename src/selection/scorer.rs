// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Requirement scorer / filter
//!
//! Two-phase selection over the catalog: hard filters drop models that
//! cannot satisfy the request at all, then every survivor gets an additive
//! score from the weighted signals below. Scores are relative, not
//! normalized; only the ordering matters. The sort is stable, so repeated
//! calls on identical input produce identical output.
//!
//! An empty result is a legitimate outcome, not an error: the orchestration
//! layer decides whether to relax constraints and retry.

use serde::Serialize;

use crate::catalog::{ModelDescriptor, QualityLevel};
use super::requirements::{RequirementSpec, SpeedPreference};

/// Default shortlist length
pub const DEFAULT_LIMIT: usize = 5;

/// Typed accumulator: ordered `(delta, reason)` pairs summed once at the
/// end, so each signal stays auditable on its own
#[derive(Debug, Clone, Default)]
pub struct ScoreBreakdown {
    entries: Vec<(f64, String)>,
}

impl ScoreBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one fired signal
    pub fn add(&mut self, delta: f64, label: impl Into<String>) {
        self.entries.push((delta, label.into()));
    }

    /// Sum of all recorded deltas
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(delta, _)| delta).sum()
    }

    /// Human-readable reasons in evaluation order
    pub fn reasons(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(delta, label)| format!("{} ({:+.1})", label, delta))
            .collect()
    }
}

/// One scored candidate; request-scoped, never persisted
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub model: ModelDescriptor,
    pub score: f64,
    pub reasons: Vec<String>,
}

/// Scorer output envelope for the orchestration layer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    pub models: Vec<ScoredCandidate>,
    /// Candidates surviving the hard filters, before the limit slice
    pub total: usize,
    /// Whether the hard filters dropped anything
    pub filtered: bool,
}

/// Filter the catalog against the requirements and return the top `limit`
/// candidates, descending by score, ties stable in catalog order.
pub fn filter_and_score(
    catalog: &[ModelDescriptor],
    requirements: &RequirementSpec,
    limit: usize,
) -> Vec<ScoredCandidate> {
    let mut candidates: Vec<ScoredCandidate> = catalog
        .iter()
        .filter(|m| passes_hard_filters(m, requirements))
        .map(|m| {
            let breakdown = score_model(m, requirements);
            ScoredCandidate {
                model: m.clone(),
                score: breakdown.total(),
                reasons: breakdown.reasons(),
            }
        })
        .collect();

    // Stable: equal scores keep catalog order, so output is deterministic
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    candidates.truncate(limit);
    candidates
}

/// `filter_and_score` wrapped in the envelope the orchestration layer
/// consumes
pub fn select_models(
    catalog: &[ModelDescriptor],
    requirements: &RequirementSpec,
    limit: usize,
) -> SelectionResult {
    let survivors = catalog
        .iter()
        .filter(|m| passes_hard_filters(m, requirements))
        .count();

    SelectionResult {
        models: filter_and_score(catalog, requirements, limit),
        total: survivors,
        filtered: survivors < catalog.len(),
    }
}

/// Phase A: must-pass predicates. A model failing any applicable filter is
/// dropped before scoring.
fn passes_hard_filters(model: &ModelDescriptor, requirements: &RequirementSpec) -> bool {
    let caps = &model.capabilities;

    if requirements.needs_reference_images {
        if !caps.supports_single_reference && !caps.image_to_image {
            return false;
        }
    } else if !caps.text_to_image {
        return false;
    }

    if let Some(ratio) = &requirements.aspect_ratio {
        let ratios = &caps.supported_aspect_ratios;
        let is_custom = ratios.iter().any(|r| r == "custom");
        if !ratios.is_empty() && !is_custom && !ratios.iter().any(|r| r == ratio) {
            return false;
        }
    }

    true
}

/// Phase B: additive scoring. Re-checks conditions phase A already
/// enforced, so it stays callable standalone.
fn score_model(model: &ModelDescriptor, requirements: &RequirementSpec) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::new();
    let caps = &model.capabilities;

    // Popularity, log-scaled and capped
    let runs = model.run_count.max(1) as f64;
    let popularity = (runs.log10() / 10.0).min(1.0) * 20.0;
    breakdown.add(popularity, format!("popularity ({} runs)", model.run_count));

    if let Some(hint) = &requirements.preferred_model {
        if model.matches_hint(hint) {
            breakdown.add(100.0, format!("matches preferred model \"{}\"", hint));
        }
    }

    if requirements.needs_reference_images {
        if caps.supports_single_reference || caps.image_to_image {
            breakdown.add(30.0, "supports reference images");
        } else {
            breakdown.add(-50.0, "cannot use reference images");
        }
    } else if caps.text_to_image {
        breakdown.add(10.0, "text-to-image capable");
    }

    if !requirements.style_focus.is_empty() {
        let strengths: Vec<String> = model
            .summary
            .as_ref()
            .map(|s| s.style_strengths.iter().map(|x| x.to_lowercase()).collect())
            .unwrap_or_default();

        let mut matched = 0;
        for style in &requirements.style_focus {
            let style_lower = style.to_lowercase();
            if strengths
                .iter()
                .any(|s| s.contains(&style_lower) || style_lower.contains(s.as_str()))
            {
                matched += 1;
                breakdown.add(15.0, format!("style match \"{}\"", style));
            }
        }
        if matched == 0 {
            breakdown.add(-10.0, "no requested style matched");
        }
    }

    if let (Some(required), Some(summary)) = (requirements.min_quality, &model.summary) {
        let profile = &summary.quality_profile;
        if profile.detail.rank() >= required.rank() {
            breakdown.add(10.0, "detail meets required quality");
        } else {
            breakdown.add(-20.0, "detail below required quality");
        }
        if profile.prompt_following.rank() >= required.rank() {
            breakdown.add(5.0, "prompt following meets required quality");
        }
    }

    if let Some(summary) = &model.summary {
        let speed = summary.quality_profile.speed;
        match requirements.speed_preference {
            SpeedPreference::Fast => {
                if speed.is_fast() {
                    breakdown.add(15.0, "fast model for speed preference");
                } else if speed.is_slow() {
                    breakdown.add(-10.0, "slow model despite speed preference");
                }
            }
            SpeedPreference::QualityPriority => {
                if speed.is_fast() {
                    breakdown.add(-5.0, "speed-optimized model for quality-first request");
                }
            }
            SpeedPreference::Unset => {}
        }
    }

    if let (Some(use_case), Some(summary)) = (&requirements.use_case, &model.summary) {
        let use_case_lower = use_case.to_lowercase();
        let either_way = |entry: &String| {
            let entry = entry.to_lowercase();
            entry.contains(&use_case_lower) || use_case_lower.contains(&entry)
        };

        if summary.best_for.iter().any(either_way) {
            breakdown.add(20.0, format!("suited to use case \"{}\"", use_case));
        }
        if summary.not_good_for.iter().any(either_way) {
            breakdown.add(-30.0, format!("poor fit for use case \"{}\"", use_case));
        }
    }

    if let Some(ratio) = &requirements.aspect_ratio {
        let ratios = &caps.supported_aspect_ratios;
        if ratios.iter().any(|r| r == ratio) {
            breakdown.add(5.0, format!("native {} support", ratio));
        } else if ratios.iter().any(|r| r == "custom") {
            breakdown.add(3.0, "custom dimensions cover requested ratio");
        } else if !ratios.is_empty() {
            breakdown.add(-5.0, format!("no declared {} support", ratio));
        }
    }

    if !requirements.special_needs.is_empty() {
        if let Some(summary) = &model.summary {
            // The original behavior: substring match over the serialized
            // summary document
            let haystack = serde_json::to_string(summary)
                .unwrap_or_default()
                .to_lowercase();
            for need in &requirements.special_needs {
                if haystack.contains(&need.to_lowercase()) {
                    breakdown.add(10.0, format!("covers special need \"{}\"", need));
                }
            }
        }
    }

    breakdown
}
