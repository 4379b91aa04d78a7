// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Generation invocation adapter
//!
//! Maps a chosen model's declared schema to concrete invocation parameters:
//! resolves the requested aspect ratio into whatever the model understands
//! (a native `aspect_ratio` value or a width/height pair), and routes
//! reference images into the correct schema field. This is the one place in
//! the crate allowed to raise user-facing validation errors.

use serde_json::{json, Map, Value};

use crate::catalog::{ModelDescriptor, ParamType};
use crate::error::{EaselError, Result};

/// Base dimension the fallback width/height computation preserves area
/// around
pub const BASE_DIMENSION: u32 = 1024;

/// Pixel dimensions for common named ratios
pub const RATIO_DIMENSIONS: &[(&str, (u32, u32))] = &[
    ("1:1", (1024, 1024)),
    ("16:9", (1344, 768)),
    ("9:16", (768, 1344)),
    ("21:9", (1536, 640)),
    ("9:21", (640, 1536)),
    ("4:3", (1152, 896)),
    ("3:4", (896, 1152)),
    ("3:2", (1216, 832)),
    ("2:3", (832, 1216)),
    ("5:4", (1088, 896)),
    ("4:5", (896, 1088)),
];

/// What the orchestration layer asks a chosen model to do
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub aspect_ratio: Option<String>,
    pub reference_images: Vec<String>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio: None,
            reference_images: Vec::new(),
        }
    }

    /// Builder: set the requested aspect ratio
    pub fn with_aspect_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(ratio.into());
        self
    }

    /// Builder: set reference image URLs
    pub fn with_reference_images(mut self, urls: &[&str]) -> Self {
        self.reference_images = urls.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Build the provider input map for invoking `model` with `request`.
///
/// Errors are validation mismatches between the request and the model's
/// capabilities; they surface to the end caller.
pub fn build_generation_input(
    model: &ModelDescriptor,
    request: &GenerationRequest,
) -> Result<Value> {
    let mut input = Map::new();
    input.insert("prompt".to_string(), json!(request.prompt));

    apply_aspect_ratio(model, request, &mut input);
    apply_reference_images(model, request, &mut input)?;

    Ok(Value::Object(input))
}

fn apply_aspect_ratio(model: &ModelDescriptor, request: &GenerationRequest, input: &mut Map<String, Value>) {
    let ratio = request.aspect_ratio.as_deref().unwrap_or("1:1");

    if let Some(param) = model.input_schema.get("aspect_ratio") {
        let options = param.string_options();
        if options.is_empty() || options.iter().any(|o| o == ratio) {
            input.insert("aspect_ratio".to_string(), json!(ratio));
            return;
        }
    }

    if model.input_schema.contains_key("width") && model.input_schema.contains_key("height") {
        let (width, height) = resolve_dimensions(ratio);
        input.insert("width".to_string(), json!(width));
        input.insert("height".to_string(), json!(height));
    }
}

/// Resolve a ratio string to pixel dimensions: named ratios come from the
/// table, anything else parseable as `W:H` preserves the ratio around
/// `BASE_DIMENSION`, and garbage degrades to square.
pub fn resolve_dimensions(ratio: &str) -> (u32, u32) {
    if let Some((_, dims)) = RATIO_DIMENSIONS.iter().find(|(name, _)| *name == ratio) {
        return *dims;
    }

    if let Some((w, h)) = parse_ratio(ratio) {
        let r = w / h;
        let width = (BASE_DIMENSION as f64 * r.sqrt()).round() as u32;
        let height = (BASE_DIMENSION as f64 / r.sqrt()).round() as u32;
        // Diffusion backends want dimensions divisible by 8
        return ((width / 8) * 8, (height / 8) * 8);
    }

    (BASE_DIMENSION, BASE_DIMENSION)
}

fn parse_ratio(ratio: &str) -> Option<(f64, f64)> {
    let (w, h) = ratio.split_once(':')?;
    let w: f64 = w.trim().parse().ok()?;
    let h: f64 = h.trim().parse().ok()?;
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    Some((w, h))
}

fn apply_reference_images(
    model: &ModelDescriptor,
    request: &GenerationRequest,
    input: &mut Map<String, Value>,
) -> Result<()> {
    if request.reference_images.is_empty() {
        return Ok(());
    }

    // Mask fields are inpainting-only and never receive references
    let candidates: Vec<(&String, &crate::catalog::ParameterDescriptor)> = model
        .input_schema
        .iter()
        .filter(|(_, p)| p.is_image_input && !p.is_mask)
        .collect();

    if candidates.is_empty() {
        return Err(EaselError::ModelDoesNotAcceptReferences(
            model.full_name.clone(),
        ));
    }

    // An array-typed field takes every URL; otherwise the first scalar
    // field takes exactly one
    if let Some((name, _)) = candidates
        .iter()
        .find(|(_, p)| p.param_type == ParamType::Array)
    {
        input.insert((*name).clone(), json!(request.reference_images));
        return Ok(());
    }

    let (name, _) = candidates[0];
    if request.reference_images.len() > 1 {
        return Err(EaselError::TooManyReferenceImages {
            supplied: request.reference_images.len(),
            field: name.clone(),
        });
    }
    input.insert(name.clone(), json!(request.reference_images[0]));
    Ok(())
}
