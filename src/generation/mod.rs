// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Generation invocation boundary
//!
//! The actual image generation happens in an external provider call owned
//! by the orchestration layer. This module only prepares that call's input
//! from a chosen model's schema and validates the request against the
//! model's capabilities.

pub mod adapter;

// Re-export commonly used types
pub use adapter::{
    build_generation_input, resolve_dimensions, GenerationRequest, BASE_DIMENSION,
    RATIO_DIMENSIONS,
};
