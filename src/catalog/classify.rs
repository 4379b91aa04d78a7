// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Capability classifier
//!
//! Derives coarse boolean capabilities from a normalized parameter map, and
//! recognizes image-generation models among arbitrary catalog entries via
//! keyword allow/deny lists.
//!
//! Defaults are deliberately fail-open and preserved as business behavior:
//! a model with no schema at all is assumed text-capable, and a model that
//! declares nothing about aspect ratios gets `["1:1"]`. Changing these
//! defaults changes which models surface for sparse catalog entries.

use super::schema::{InputSchema, ModelCapabilities, ParamType};

/// Keywords that mark a catalog entry as an image-generation model
pub const IMAGE_MODEL_ALLOW: &[&str] = &[
    "image",
    "img",
    "photo",
    "picture",
    "text-to-image",
    "diffusion",
    "flux",
    "stable-diffusion",
    "sdxl",
    "inpaint",
    "illustration",
    "art",
];

/// Keywords that disqualify an entry even when an allow keyword matches
pub const IMAGE_MODEL_DENY: &[&str] = &[
    "video",
    "audio",
    "music",
    "speech",
    "voice",
    "transcri",
    "language model",
    "llm",
    "chat",
    "embedding",
    "caption",
    "upscal",
];

/// Heuristic text classifier over a catalog entry's textual metadata.
///
/// Deny keywords win over allow keywords; an entry matching neither list is
/// not an image model.
pub fn is_image_generation_model(name: &str, description: &str, tags: &[String]) -> bool {
    let haystack = format!("{} {} {}", name, description, tags.join(" ")).to_lowercase();

    if IMAGE_MODEL_DENY.iter().any(|kw| haystack.contains(kw)) {
        return false;
    }
    IMAGE_MODEL_ALLOW.iter().any(|kw| haystack.contains(kw))
}

/// Derive capabilities from a normalized parameter map.
///
/// Total: any schema, including the empty map, yields a fully populated
/// `ModelCapabilities` with a non-empty aspect-ratio list.
pub fn classify_capabilities(schema: &InputSchema) -> ModelCapabilities {
    // A model with an unknown/empty schema is assumed text-capable rather
    // than under-filtered out of every catalog query
    let text_to_image = schema.is_empty() || schema.contains_key("prompt");

    // Mask parameters are inpainting-only and never count as reference
    // inputs
    let candidates: Vec<_> = schema
        .values()
        .filter(|p| p.is_image_input && !p.is_mask)
        .collect();

    let image_to_image = !candidates.is_empty();
    let supports_multiple_references = candidates
        .iter()
        .any(|p| p.param_type == ParamType::Array);

    ModelCapabilities {
        text_to_image,
        image_to_image,
        supports_single_reference: image_to_image,
        supports_multiple_references,
        supported_aspect_ratios: supported_aspect_ratios(schema),
    }
}

fn supported_aspect_ratios(schema: &InputSchema) -> Vec<String> {
    if let Some(param) = schema.get("aspect_ratio") {
        let options = param.string_options();
        if !options.is_empty() {
            return options;
        }
    }

    if schema.contains_key("width") && schema.contains_key("height") {
        return vec!["custom".to_string()];
    }

    vec!["1:1".to_string()]
}
