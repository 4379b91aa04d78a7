// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Easel Contributors

//! Schema extractor
//!
//! Converts a third-party model's raw parameter schema (a JSON-schema-like
//! document as returned by the hosting API) into a flat, normalized
//! parameter map. Provider schemas are untrusted and vary wildly in quality,
//! so extraction is fail-open: a malformed or missing schema degrades to an
//! empty map with a warning and never blocks catalog construction.

use serde_json::Value;

use super::schema::{InputSchema, ParamType, ParameterDescriptor};

/// Recognized shapes of a single property declaration.
///
/// Anything that is not an inline `type` or an `allOf` composite reduces to
/// `Unknown`, which extracts as a string-typed parameter.
enum PropertyShape<'a> {
    /// Inline `"type": "..."` declaration
    Typed(&'a str),
    /// `allOf` composite; the first member's type wins
    Composite(&'a [Value]),
    Unknown,
}

fn shape_of(prop: &Value) -> PropertyShape<'_> {
    if let Some(t) = prop.get("type").and_then(Value::as_str) {
        return PropertyShape::Typed(t);
    }
    if let Some(members) = prop.get("allOf").and_then(Value::as_array) {
        return PropertyShape::Composite(members);
    }
    PropertyShape::Unknown
}

fn declared_type(prop: &Value) -> ParamType {
    match shape_of(prop) {
        PropertyShape::Typed(t) => ParamType::parse(t),
        PropertyShape::Composite(members) => members
            .first()
            .and_then(|m| m.get("type"))
            .and_then(Value::as_str)
            .map(ParamType::parse)
            .unwrap_or_default(),
        PropertyShape::Unknown => ParamType::default(),
    }
}

/// Extract a normalized parameter map from a raw provider schema.
///
/// Total over any input: non-object schemas and schemas without a
/// `properties` object yield an empty map. Pure aside from the degraded-path
/// warning log.
pub fn extract_schema(raw: &Value) -> InputSchema {
    let mut out = InputSchema::new();

    let Some(properties) = raw.get("properties").and_then(Value::as_object) else {
        if !raw.is_null() {
            tracing::warn!("provider schema has no properties object; extracting empty schema");
        }
        return out;
    };

    let required: Vec<&str> = raw
        .get("required")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    for (name, prop) in properties {
        out.insert(name.clone(), extract_parameter(name, prop, &required));
    }

    out
}

fn extract_parameter(name: &str, prop: &Value, required: &[&str]) -> ParameterDescriptor {
    let description = prop
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let options = prop
        .get("enum")
        .and_then(Value::as_array)
        .map(|arr| arr.to_vec());

    // Presence, not truthiness: 0 and false are real defaults
    let default = prop.get("default").cloned();

    let format = prop
        .get("format")
        .and_then(Value::as_str)
        .map(|s| s.to_string());

    let name_lower = name.to_lowercase();
    let desc_lower = description.to_lowercase();

    let is_image_input = name_lower.contains("image")
        || format.as_deref() == Some("uri")
        || desc_lower.contains("image");

    let is_mask = name_lower.contains("mask") || desc_lower.contains("mask for inpainting");

    ParameterDescriptor {
        param_type: declared_type(prop),
        description,
        required: required.contains(&name),
        options,
        default,
        format,
        is_image_input,
        is_mask,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_basic_schema() {
        let raw = json!({
            "properties": {
                "prompt": { "type": "string", "description": "Text prompt" },
                "steps": { "type": "integer", "default": 28 }
            },
            "required": ["prompt"]
        });

        let schema = extract_schema(&raw);
        assert_eq!(schema.len(), 2);

        let prompt = &schema["prompt"];
        assert_eq!(prompt.param_type, ParamType::String);
        assert!(prompt.required);
        assert!(!prompt.is_image_input);

        let steps = &schema["steps"];
        assert_eq!(steps.param_type, ParamType::Integer);
        assert!(!steps.required);
        assert_eq!(steps.default, Some(json!(28)));
    }

    #[test]
    fn test_extract_never_panics_on_malformed_input() {
        // Total over any input
        assert!(extract_schema(&Value::Null).is_empty());
        assert!(extract_schema(&json!(42)).is_empty());
        assert!(extract_schema(&json!("not a schema")).is_empty());
        assert!(extract_schema(&json!({})).is_empty());
        assert!(extract_schema(&json!({ "properties": null })).is_empty());
        assert!(extract_schema(&json!({ "properties": [1, 2] })).is_empty());
    }

    #[test]
    fn test_extract_all_of_composite_type() {
        let raw = json!({
            "properties": {
                "output_format": {
                    "allOf": [
                        { "type": "string", "enum": ["png", "jpg"] }
                    ]
                }
            }
        });

        let schema = extract_schema(&raw);
        assert_eq!(schema["output_format"].param_type, ParamType::String);
    }

    #[test]
    fn test_extract_untyped_property_defaults_to_string() {
        let raw = json!({
            "properties": {
                "mystery": { "description": "no declared type" }
            }
        });

        let schema = extract_schema(&raw);
        assert_eq!(schema["mystery"].param_type, ParamType::String);
    }

    #[test]
    fn test_extract_enum_order_preserved() {
        let raw = json!({
            "properties": {
                "aspect_ratio": {
                    "type": "string",
                    "enum": ["16:9", "1:1", "9:16"]
                }
            }
        });

        let schema = extract_schema(&raw);
        assert_eq!(
            schema["aspect_ratio"].string_options(),
            vec!["16:9", "1:1", "9:16"]
        );
    }

    #[test]
    fn test_extract_falsy_defaults_kept() {
        let raw = json!({
            "properties": {
                "seed": { "type": "integer", "default": 0 },
                "disable_safety": { "type": "boolean", "default": false }
            }
        });

        let schema = extract_schema(&raw);
        assert_eq!(schema["seed"].default, Some(json!(0)));
        assert_eq!(schema["disable_safety"].default, Some(json!(false)));
    }

    #[test]
    fn test_image_input_detection() {
        let raw = json!({
            "properties": {
                "image": { "type": "string" },
                "init_picture": { "type": "string", "format": "uri" },
                "ref_photo": { "type": "string", "description": "An image to guide generation" },
                "steps": { "type": "integer" }
            }
        });

        let schema = extract_schema(&raw);
        // By name
        assert!(schema["image"].is_image_input);
        // By format
        assert!(schema["init_picture"].is_image_input);
        // By description
        assert!(schema["ref_photo"].is_image_input);
        assert!(!schema["steps"].is_image_input);
    }

    #[test]
    fn test_mask_detection() {
        // Mask parameters flagged by name or description
        let raw = json!({
            "properties": {
                "mask": { "type": "string", "format": "uri" },
                "mask_image": { "type": "string" },
                "region": { "type": "string", "description": "Mask for inpainting the region" }
            }
        });

        let schema = extract_schema(&raw);
        assert!(schema["mask"].is_mask);
        assert!(schema["mask_image"].is_mask);
        assert!(schema["region"].is_mask);
        // A mask with a uri format is still an image input; the classifier
        // excludes it from reference detection, not the extractor
        assert!(schema["mask"].is_image_input);
    }

    #[test]
    fn test_required_membership() {
        let raw = json!({
            "properties": {
                "prompt": { "type": "string" },
                "image": { "type": "string" }
            },
            "required": ["prompt", "image"]
        });

        let schema = extract_schema(&raw);
        assert!(schema["prompt"].required);
        assert!(schema["image"].required);
    }

    #[test]
    fn test_required_list_malformed_entries_skipped() {
        let raw = json!({
            "properties": { "prompt": { "type": "string" } },
            "required": [42, "prompt", null]
        });

        let schema = extract_schema(&raw);
        assert!(schema["prompt"].required);
    }
}
