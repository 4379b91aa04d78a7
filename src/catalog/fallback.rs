// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Built-in fallback models
//!
//! A small fixed list of well-known image-generation models with
//! hand-authored schemas, used whenever the live catalog source is
//! unreachable. The raw schemas here run through the same extractor and
//! classifier as live records, so derived capabilities stay consistent with
//! the refresh pipeline.
//!
//! This list is always available and never cached or timestamped.

use serde_json::json;

use super::extract::extract_schema;
use super::schema::{
    ModelDescriptor, ModelSummary, QualityLevel, QualityProfile, SpeedLevel,
};

/// The static fallback catalog, ordered by popularity
pub fn fallback_models() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::new("black-forest-labs", "flux-schnell")
            .with_display_name("FLUX.1 [schnell]")
            .with_description("The fastest image generation model tailored for local development")
            .with_run_count(280_000_000)
            .with_tags(&["text-to-image"])
            .official()
            .with_input_schema(extract_schema(&json!({
                "properties": {
                    "prompt": { "type": "string", "description": "Prompt for generated image" },
                    "aspect_ratio": {
                        "type": "string",
                        "enum": ["1:1", "16:9", "21:9", "3:2", "2:3", "4:5", "5:4", "3:4", "4:3", "9:16", "9:21"],
                        "default": "1:1"
                    },
                    "num_outputs": { "type": "integer", "default": 1 },
                    "seed": { "type": "integer", "description": "Random seed" }
                },
                "required": ["prompt"]
            })))
            .with_summary(ModelSummary {
                one_line_pitch: "Blazing fast drafts at minimal cost".to_string(),
                best_for: vec!["rapid iteration".to_string(), "drafts".to_string()],
                not_good_for: vec!["fine text rendering".to_string()],
                style_strengths: vec!["general purpose".to_string()],
                quality_profile: QualityProfile {
                    speed: SpeedLevel::VeryFast,
                    detail: QualityLevel::Good,
                    coherence: QualityLevel::Good,
                    prompt_following: QualityLevel::Good,
                },
                typical_use_case: "quick concept exploration".to_string(),
            }),
        ModelDescriptor::new("black-forest-labs", "flux-dev")
            .with_display_name("FLUX.1 [dev]")
            .with_description("A 12 billion parameter rectified flow transformer for image generation")
            .with_run_count(120_000_000)
            .with_tags(&["text-to-image", "image-to-image"])
            .official()
            .with_input_schema(extract_schema(&json!({
                "properties": {
                    "prompt": { "type": "string", "description": "Prompt for generated image" },
                    "image": {
                        "type": "string",
                        "format": "uri",
                        "description": "Input image for image to image mode"
                    },
                    "aspect_ratio": {
                        "type": "string",
                        "enum": ["1:1", "16:9", "21:9", "3:2", "2:3", "4:5", "5:4", "3:4", "4:3", "9:16", "9:21"],
                        "default": "1:1"
                    },
                    "prompt_strength": { "type": "number", "default": 0.8 },
                    "num_inference_steps": { "type": "integer", "default": 28 }
                },
                "required": ["prompt"]
            })))
            .with_summary(ModelSummary {
                one_line_pitch: "High quality generation with strong prompt adherence".to_string(),
                best_for: vec![
                    "detailed illustration".to_string(),
                    "photorealism".to_string(),
                ],
                not_good_for: vec!["real-time use".to_string()],
                style_strengths: vec![
                    "photorealism".to_string(),
                    "illustration".to_string(),
                ],
                quality_profile: QualityProfile {
                    speed: SpeedLevel::Moderate,
                    detail: QualityLevel::VeryGood,
                    coherence: QualityLevel::VeryGood,
                    prompt_following: QualityLevel::VeryGood,
                },
                typical_use_case: "polished single-subject imagery".to_string(),
            }),
        ModelDescriptor::new("stability-ai", "sdxl")
            .with_display_name("Stable Diffusion XL")
            .with_description("A text-to-image generative AI model that creates beautiful images")
            .with_run_count(75_000_000)
            .with_tags(&["text-to-image", "inpainting"])
            .official()
            .with_input_schema(extract_schema(&json!({
                "properties": {
                    "prompt": { "type": "string", "description": "Input prompt" },
                    "negative_prompt": { "type": "string", "description": "Input negative prompt" },
                    "image": {
                        "type": "string",
                        "format": "uri",
                        "description": "Input image for img2img or inpaint mode"
                    },
                    "mask": {
                        "type": "string",
                        "format": "uri",
                        "description": "Mask for inpainting. Black areas preserved, white areas inpainted"
                    },
                    "width": { "type": "integer", "default": 1024 },
                    "height": { "type": "integer", "default": 1024 }
                },
                "required": ["prompt"]
            })))
            .with_summary(ModelSummary {
                one_line_pitch: "Battle-tested workhorse with inpainting support".to_string(),
                best_for: vec!["inpainting".to_string(), "stylized art".to_string()],
                not_good_for: vec!["legible text".to_string()],
                style_strengths: vec!["anime".to_string(), "concept art".to_string()],
                quality_profile: QualityProfile {
                    speed: SpeedLevel::Moderate,
                    detail: QualityLevel::Good,
                    coherence: QualityLevel::Good,
                    prompt_following: QualityLevel::Moderate,
                },
                typical_use_case: "stylized art and region edits".to_string(),
            }),
        ModelDescriptor::new("flux-kontext-apps", "multi-image-kontext-pro")
            .with_display_name("Multi-Image Kontext Pro")
            .with_description("Combine and edit multiple reference images with text guidance")
            .with_run_count(9_000_000)
            .with_tags(&["image-to-image", "editing"])
            .official()
            .with_input_schema(extract_schema(&json!({
                "properties": {
                    "prompt": { "type": "string", "description": "Edit instruction" },
                    "input_images": {
                        "type": "array",
                        "description": "Reference images to combine",
                        "format": "uri"
                    },
                    "aspect_ratio": {
                        "type": "string",
                        "enum": ["match_input_image", "1:1", "16:9", "9:16", "4:3", "3:4"],
                        "default": "match_input_image"
                    }
                },
                "required": ["prompt", "input_images"]
            })))
            .with_summary(ModelSummary {
                one_line_pitch: "Blends several references into one coherent edit".to_string(),
                best_for: vec![
                    "multi-reference composition".to_string(),
                    "product mockups".to_string(),
                ],
                not_good_for: vec!["from-scratch generation".to_string()],
                style_strengths: vec!["photorealism".to_string()],
                quality_profile: QualityProfile {
                    speed: SpeedLevel::Slow,
                    detail: QualityLevel::VeryGood,
                    coherence: QualityLevel::Excellent,
                    prompt_following: QualityLevel::VeryGood,
                },
                typical_use_case: "combining reference photos into a scene".to_string(),
            }),
        ModelDescriptor::new("recraft-ai", "recraft-v3")
            .with_display_name("Recraft V3")
            .with_description("Text-to-image with vector art and brand style strengths")
            .with_run_count(6_500_000)
            .with_tags(&["text-to-image", "vector"])
            .official()
            .with_input_schema(extract_schema(&json!({
                "properties": {
                    "prompt": { "type": "string", "description": "Text prompt" },
                    "aspect_ratio": {
                        "type": "string",
                        "enum": ["1:1", "4:3", "3:4", "16:9", "9:16"],
                        "default": "1:1"
                    },
                    "style": {
                        "type": "string",
                        "enum": ["any", "realistic_image", "digital_illustration", "vector_illustration"],
                        "default": "any"
                    }
                },
                "required": ["prompt"]
            })))
            .with_summary(ModelSummary {
                one_line_pitch: "Design-grade output with crisp text and vector styles".to_string(),
                best_for: vec![
                    "logos".to_string(),
                    "posters with text".to_string(),
                    "brand assets".to_string(),
                ],
                not_good_for: vec!["photo editing".to_string()],
                style_strengths: vec![
                    "vector illustration".to_string(),
                    "typography".to_string(),
                ],
                quality_profile: QualityProfile {
                    speed: SpeedLevel::Fast,
                    detail: QualityLevel::VeryGood,
                    coherence: QualityLevel::VeryGood,
                    prompt_following: QualityLevel::Excellent,
                },
                typical_use_case: "design assets and lettering".to_string(),
            }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_non_empty() {
        assert!(!fallback_models().is_empty());
    }

    #[test]
    fn test_fallback_ids_unique() {
        let models = fallback_models();
        let mut ids: Vec<_> = models.iter().map(|m| m.full_name.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), models.len());
    }

    #[test]
    fn test_fallback_all_official_image_models() {
        for model in fallback_models() {
            assert!(model.is_official, "{} must be official", model.full_name);
            assert!(
                !model.input_schema.is_empty(),
                "{} must carry a schema",
                model.full_name
            );
        }
    }

    #[test]
    fn test_fallback_capabilities_derived_from_schema() {
        let models = fallback_models();

        let flux_dev = models.iter().find(|m| m.id == "flux-dev").unwrap();
        assert!(flux_dev.capabilities.text_to_image);
        assert!(flux_dev.capabilities.supports_single_reference);
        assert!(!flux_dev.capabilities.supports_multiple_references);

        let kontext = models
            .iter()
            .find(|m| m.id == "multi-image-kontext-pro")
            .unwrap();
        assert!(kontext.capabilities.supports_multiple_references);

        let schnell = models.iter().find(|m| m.id == "flux-schnell").unwrap();
        assert!(schnell.capabilities.text_to_image);
        assert!(!schnell.capabilities.image_to_image);
    }

    #[test]
    fn test_fallback_sdxl_mask_excluded_from_references() {
        let models = fallback_models();
        let sdxl = models.iter().find(|m| m.id == "sdxl").unwrap();

        assert!(sdxl.input_schema["mask"].is_mask);
        // img2img via the non-mask image field only
        assert!(sdxl.capabilities.supports_single_reference);
        assert!(!sdxl.capabilities.supports_multiple_references);
        assert_eq!(sdxl.capabilities.supported_aspect_ratios, vec!["custom"]);
    }

    #[test]
    fn test_fallback_sorted_by_popularity() {
        let models = fallback_models();
        for pair in models.windows(2) {
            assert!(pair[0].run_count >= pair[1].run_count);
        }
    }
}
