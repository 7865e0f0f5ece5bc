//! # NPC Profile Validation
//!
//! Structural validation for NPC profile documents. Accumulates every
//! field-table and semantic-rule violation into one ordered diagnostic
//! sequence and always returns it to the caller; NPC validation never
//! fails with an error for data-quality problems.

use std::path::Path;
use std::sync::OnceLock;

use serde_json::{Map, Value};

use crate::check;
use crate::contract::{
    FieldSpec, RuleContext, SchemaTable, TypeContract, ValueKind, DISALLOWED_NAME_CHARS,
};
use crate::diagnostics::{Diagnostics, ValidationOutcome};
use crate::loader;

/// Optional `ai_config` sub-fields, checked only when present.
const OPTIONAL_AI_FIELDS: &[(&str, ValueKind, &str)] = &[
    ("temperature", ValueKind::Number, "a number"),
    ("max_tokens", ValueKind::Integer, "an integer"),
    ("system_prompt", ValueKind::String, "a string"),
    ("model", ValueKind::String, "a string"),
    ("base_url", ValueKind::String, "a string"),
    ("api_key", ValueKind::String, "a string"),
];

static NPC_SCHEMA: OnceLock<SchemaTable> = OnceLock::new();

fn npc_schema() -> &'static SchemaTable {
    NPC_SCHEMA.get_or_init(|| SchemaTable {
        fields: vec![
            FieldSpec::required("name", TypeContract::Scalar(ValueKind::String)),
            FieldSpec::required(
                "nickname",
                TypeContract::Union(&[ValueKind::String, ValueKind::Null]),
            ),
            FieldSpec::required("role", TypeContract::Scalar(ValueKind::String)),
            FieldSpec::required("species", TypeContract::Scalar(ValueKind::String)),
            FieldSpec::required("lineage", TypeContract::Scalar(ValueKind::String)),
            FieldSpec::required("personality", TypeContract::Scalar(ValueKind::String)),
            FieldSpec::required("relationships", TypeContract::mapping_of(ValueKind::String)),
            FieldSpec::required("key_traits", TypeContract::sequence_of(ValueKind::String)),
            FieldSpec::required("abilities", TypeContract::sequence_of(ValueKind::String)),
            FieldSpec::required("recurring", TypeContract::Scalar(ValueKind::Boolean)),
            FieldSpec::required("notes", TypeContract::Scalar(ValueKind::String)),
            FieldSpec::required("ai_config", TypeContract::Mapping(None)),
        ],
        rules: vec![
            check_name_charset,
            check_ai_config,
            check_relationships,
            check_key_traits,
            check_abilities,
        ],
    })
}

fn check_name_charset(doc: &Map<String, Value>, ctx: &RuleContext<'_>, d: &mut Diagnostics) {
    let name = doc.get("name").and_then(Value::as_str).unwrap_or("");
    if name.chars().any(|c| DISALLOWED_NAME_CHARS.contains(c)) {
        d.push(format!(
            "{}: Strange characters are not allowed in NPC name. Please use another name \
             (disallowed: {DISALLOWED_NAME_CHARS}). Name: '{name}'",
            ctx.source_path
        ));
    }
}

/// `ai_config.enabled` is required; the other sub-fields are optional and
/// only kind-checked when present. Runs only once `ai_config` itself is a
/// mapping — the table-level wrong-kind diagnostic is emitted regardless.
fn check_ai_config(doc: &Map<String, Value>, _ctx: &RuleContext<'_>, d: &mut Diagnostics) {
    let Some(Value::Object(ai_config)) = doc.get("ai_config") else {
        return;
    };

    match ai_config.get("enabled") {
        None => d.push("ai_config missing required field: enabled"),
        Some(value) if !value.is_boolean() => d.push("ai_config.enabled must be a boolean"),
        Some(_) => {}
    }

    for (field, kind, description) in OPTIONAL_AI_FIELDS {
        if let Some(value) = ai_config.get(*field) {
            if !ValueKind::of(value).satisfies(*kind) {
                d.push(format!("ai_config.{field} must be {description}"));
            }
        }
    }
}

/// Every mismatching relationship value is reported individually.
fn check_relationships(doc: &Map<String, Value>, _ctx: &RuleContext<'_>, d: &mut Diagnostics) {
    let Some(Value::Object(relationships)) = doc.get("relationships") else {
        return;
    };
    let contract = TypeContract::Scalar(ValueKind::String);
    for (key, _mismatch) in check::mapping_value_mismatches(relationships, &contract) {
        d.push(format!("Relationship value for '{key}' must be a string"));
    }
}

/// One diagnostic at the first non-string element, then the list is
/// abandoned — unlike the relationship-map policy above.
fn check_string_list(doc: &Map<String, Value>, field: &str, d: &mut Diagnostics) {
    let Some(Value::Array(items)) = doc.get(field) else {
        return;
    };
    let contract = TypeContract::Scalar(ValueKind::String);
    if check::first_sequence_mismatch(items, &contract).is_some() {
        d.push(format!("All {field} must be strings"));
    }
}

fn check_key_traits(doc: &Map<String, Value>, _ctx: &RuleContext<'_>, d: &mut Diagnostics) {
    check_string_list(doc, "key_traits", d);
}

fn check_abilities(doc: &Map<String, Value>, _ctx: &RuleContext<'_>, d: &mut Diagnostics) {
    check_string_list(doc, "abilities", d);
}

/// Validate a parsed NPC profile. Pure: no I/O, no mutation of the
/// document, identical outcomes for identical inputs.
///
/// `source_path` appears verbatim in path-bearing diagnostics; pass an
/// empty string for documents that did not come from a file.
pub fn validate_npc(document: &Value, source_path: &str) -> ValidationOutcome {
    let mut diagnostics = Diagnostics::new();

    let Some(doc) = document.as_object() else {
        diagnostics.push(format!(
            "NPC profile must be a mapping, got {}",
            ValueKind::of(document)
        ));
        return ValidationOutcome::from_diagnostics(diagnostics);
    };

    let schema = npc_schema();
    for issue in schema.field_issues(doc) {
        diagnostics.push(issue.to_message());
    }

    let ctx = RuleContext { source_path, sibling_dir: None };
    schema.apply_rules(doc, &ctx, &mut diagnostics);

    ValidationOutcome::from_diagnostics(diagnostics)
}

/// Validate an NPC profile file. Load failures become a single diagnostic
/// and short-circuit the structural checks.
pub fn validate_npc_file(path: &Path) -> ValidationOutcome {
    match loader::load_document(path) {
        Ok(document) => validate_npc(&document, &path.display().to_string()),
        Err(error) => ValidationOutcome::from_diagnostics(Diagnostics::single(error.to_string())),
    }
}
