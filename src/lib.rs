// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Easel - model selection core for conversational image generation.
//!
//! Given a natural-language image request, an upstream language model
//! authors a structured requirement spec; this crate turns that spec plus a
//! live model catalog into a ranked shortlist and, once a model is chosen,
//! into concrete invocation parameters.
//!
//! Module map:
//! - `catalog`: fetching, caching, schema extraction, and capability
//!   classification of hosted image models
//! - `selection`: requirement spec parsing plus filtering and scoring
//! - `generation`: mapping a chosen model's schema to invocation input
//! - `config`: settings file and service wiring

pub mod catalog;
pub mod config;
pub mod error;
pub mod generation;
pub mod selection;

pub use error::{EaselError, Result};
