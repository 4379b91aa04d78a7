// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Model selection
//!
//! Turns an upstream-authored requirement spec and the model catalog into a
//! ranked shortlist. Pure computation: no I/O, no shared state. The
//! orchestration layer feeds the shortlist to its final-selection policy
//! and is responsible for retrying with looser catalog filters when the
//! shortlist comes back empty.

pub mod requirements;
pub mod scorer;

// Re-export commonly used types
pub use requirements::{RequirementSpec, SpeedPreference};
pub use scorer::{
    filter_and_score, select_models, ScoreBreakdown, ScoredCandidate, SelectionResult,
    DEFAULT_LIMIT,
};
