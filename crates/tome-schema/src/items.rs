//! # Items Registry Validation
//!
//! Structural validation for the custom-items registry. The registry is a
//! single mapping from item key to item entry; keys starting with `_` are
//! metadata and skipped. Non-throwing.

use std::path::Path;
use std::sync::OnceLock;

use serde_json::{Map, Value};

use crate::contract::{
    FieldSpec, SchemaTable, TypeContract, ValueKind, DISALLOWED_NAME_CHARS,
};
use crate::diagnostics::{Diagnostics, ValidationOutcome};
use crate::loader;

/// Accepted values for an entry's `item_type` field.
pub const VALID_ITEM_TYPES: &[&str] = &[
    "magic_item",
    "weapon",
    "armor",
    "gear",
    "tool",
    "consumable",
    "treasure",
];

static ITEM_ENTRY_SCHEMA: OnceLock<SchemaTable> = OnceLock::new();

/// Field table for one registry entry. Entry-level semantic checks carry
/// the item key, so they live in [`check_entry`] rather than table rules.
fn item_entry_schema() -> &'static SchemaTable {
    ITEM_ENTRY_SCHEMA.get_or_init(|| SchemaTable {
        fields: vec![
            FieldSpec::required("name", TypeContract::Scalar(ValueKind::String)),
            FieldSpec::required("item_type", TypeContract::Scalar(ValueKind::String)),
            FieldSpec::required("is_magic", TypeContract::Scalar(ValueKind::Boolean)),
            FieldSpec::required("description", TypeContract::Scalar(ValueKind::String)),
            FieldSpec::required("properties", TypeContract::Mapping(None)),
            FieldSpec::required("notes", TypeContract::Scalar(ValueKind::String)),
        ],
        rules: vec![],
    })
}

fn is_scalar_property(value: &Value) -> bool {
    matches!(
        ValueKind::of(value),
        ValueKind::String | ValueKind::Integer | ValueKind::Number | ValueKind::Boolean
    )
}

fn check_entry(key: &str, entry: &Map<String, Value>, d: &mut Diagnostics) {
    for issue in item_entry_schema().field_issues(entry) {
        d.push(format!("Item '{key}': {}", issue.to_message()));
    }

    // Enum membership only once item_type is a string; a non-string is
    // already covered by the field table.
    if let Some(item_type) = entry.get("item_type").and_then(Value::as_str) {
        if !VALID_ITEM_TYPES.contains(&item_type) {
            d.push(format!(
                "Item '{key}': item_type must be one of {VALID_ITEM_TYPES:?}, got '{item_type}'"
            ));
        }
    }

    if let Some(Value::Object(properties)) = entry.get("properties") {
        for (property, value) in properties {
            if !is_scalar_property(value) {
                d.push(format!(
                    "Item '{key}': Property '{property}' must be a string, number, or boolean"
                ));
            }
        }
    }

    let name = entry.get("name").and_then(Value::as_str).unwrap_or("");
    if name.chars().any(|c| DISALLOWED_NAME_CHARS.contains(c)) {
        d.push(format!(
            "Item '{key}': Strange characters are not allowed in item name. Please use another \
             name (disallowed: {DISALLOWED_NAME_CHARS}). Name: '{name}'"
        ));
    }
}

/// Validate a parsed items registry. Pure and non-throwing.
pub fn validate_items(document: &Value, _source_path: &str) -> ValidationOutcome {
    let mut diagnostics = Diagnostics::new();

    let Some(registry) = document.as_object() else {
        diagnostics.push(format!(
            "Items registry must be a mapping, got {}",
            ValueKind::of(document)
        ));
        return ValidationOutcome::from_diagnostics(diagnostics);
    };

    let entries: Vec<(&String, &Value)> = registry
        .iter()
        .filter(|(key, _)| !key.starts_with('_'))
        .collect();

    if entries.is_empty() {
        diagnostics.push("Items registry contains no item entries (only metadata)");
        return ValidationOutcome::from_diagnostics(diagnostics);
    }

    for (key, value) in entries {
        match value.as_object() {
            Some(entry) => check_entry(key, entry, &mut diagnostics),
            None => diagnostics.push(format!("Item '{key}': Must be a mapping")),
        }
    }

    ValidationOutcome::from_diagnostics(diagnostics)
}

/// Validate an items registry file. Load failures become a single
/// diagnostic and short-circuit the structural checks.
pub fn validate_items_file(path: &Path) -> ValidationOutcome {
    match loader::load_document(path) {
        Ok(document) => validate_items(&document, &path.display().to_string()),
        Err(error) => ValidationOutcome::from_diagnostics(Diagnostics::single(error.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_registry() -> Value {
        json!({
            "_meta": {"version": 2},
            "sunblade": {
                "name": "Sunblade",
                "item_type": "weapon",
                "is_magic": true,
                "description": "A blade of pure radiance.",
                "properties": {"damage": "1d8", "bonus": 2, "radiant": true},
                "notes": "Found in the Sunken Temple"
            }
        })
    }

    #[test]
    fn test_valid_registry_passes() {
        let outcome = validate_items(&sample_registry(), "");
        assert!(outcome.is_valid(), "diagnostics: {:?}", outcome.diagnostics());
    }

    #[test]
    fn test_metadata_only_registry_invalid() {
        let registry = json!({"_meta": {"version": 2}});
        let outcome = validate_items(&registry, "");
        assert_eq!(
            outcome.diagnostics(),
            ["Items registry contains no item entries (only metadata)"]
        );
    }

    #[test]
    fn test_non_mapping_entry() {
        let mut registry = sample_registry();
        registry["broken"] = json!(["not", "a", "mapping"]);
        let outcome = validate_items(&registry, "");
        assert!(outcome
            .diagnostics()
            .contains(&"Item 'broken': Must be a mapping".to_string()));
    }

    #[test]
    fn test_missing_entry_field() {
        let mut registry = sample_registry();
        registry["sunblade"].as_object_mut().unwrap().remove("is_magic");
        let outcome = validate_items(&registry, "");
        assert!(outcome
            .diagnostics()
            .contains(&"Item 'sunblade': Missing required field: is_magic".to_string()));
    }

    #[test]
    fn test_unknown_item_type() {
        let mut registry = sample_registry();
        registry["sunblade"]["item_type"] = json!("artifact");
        let outcome = validate_items(&registry, "");
        assert!(outcome.diagnostics().iter().any(|m| {
            m.starts_with("Item 'sunblade': item_type must be one of") && m.ends_with("got 'artifact'")
        }));
    }

    #[test]
    fn test_non_string_item_type_reported_once() {
        let mut registry = sample_registry();
        registry["sunblade"]["item_type"] = json!(7);
        let outcome = validate_items(&registry, "");
        let matching: Vec<_> = outcome
            .diagnostics()
            .iter()
            .filter(|m| m.contains("item_type"))
            .collect();
        // Field-table diagnostic only; no enum check for a non-string.
        assert_eq!(
            matching,
            ["Item 'sunblade': Field 'item_type' must be of type string, got integer"]
        );
    }

    #[test]
    fn test_non_scalar_property_flagged() {
        let mut registry = sample_registry();
        registry["sunblade"]["properties"] = json!({"charges": [1, 2, 3]});
        let outcome = validate_items(&registry, "");
        assert!(outcome.diagnostics().contains(
            &"Item 'sunblade': Property 'charges' must be a string, number, or boolean".to_string()
        ));
    }

    #[test]
    fn test_disallowed_item_name_characters() {
        let mut registry = sample_registry();
        registry["sunblade"]["name"] = json!("Sun<blade>");
        let outcome = validate_items(&registry, "");
        assert!(outcome
            .diagnostics()
            .iter()
            .any(|m| m.starts_with("Item 'sunblade': Strange characters")));
    }
}
