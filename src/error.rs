// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Error types for Easel
//!
//! This module defines all error types used throughout the crate.
//!
//! Propagation policy: the schema extractor and capability classifier never
//! fail, and the catalog never lets a fetch error escape (it resolves to
//! either fresh data or the built-in fallback list). Only the generation
//! adapter's validation errors and lookup misses reach the orchestration
//! boundary, where they become user-visible messages.

use thiserror::Error;

/// Main error type for Easel operations
#[derive(Error, Debug)]
pub enum EaselError {
    /// Lookup by id/full name failed
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Reference images supplied to a model with no image-accepting input
    #[error("Model {0} does not accept reference images")]
    ModelDoesNotAcceptReferences(String),

    /// More reference images supplied than the chosen input field accepts
    #[error("Too many reference images: {supplied} supplied but {field} accepts only one")]
    TooManyReferenceImages { supplied: usize, field: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog source errors (recovered internally, never user-facing)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(String),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Easel operations
pub type Result<T> = std::result::Result<T, EaselError>;

impl From<toml::de::Error> for EaselError {
    fn from(err: toml::de::Error) -> Self {
        EaselError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for EaselError {
    fn from(err: toml::ser::Error) -> Self {
        EaselError::Toml(err.to_string())
    }
}
