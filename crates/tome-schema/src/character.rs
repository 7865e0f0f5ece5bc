//! # Character Profile Validation
//!
//! Structural validation for player-character profile documents. These are
//! the documents the party cross-reference check resolves against.
//!
//! Non-throwing, like the NPC validator. Message phrasing differs slightly
//! from the NPC validator (quoted field names, `should be`, a filepath
//! prefix on every line); downstream tooling greps for these exact shapes,
//! so the divergence stays.

use std::path::Path;
use std::sync::OnceLock;

use serde_json::{Map, Value};

use crate::check;
use crate::contract::{
    FieldIssue, FieldSpec, RuleContext, SchemaTable, TypeContract, ValueKind,
    DISALLOWED_NAME_CHARS,
};
use crate::diagnostics::{Diagnostics, ValidationOutcome};
use crate::loader;

/// The six ability scores every character sheet must carry.
const ABILITY_NAMES: &[&str] = &[
    "strength",
    "dexterity",
    "constitution",
    "intelligence",
    "wisdom",
    "charisma",
];

/// Required equipment sub-fields.
const EQUIPMENT_FIELDS: &[&str] = &["weapons", "armor", "items"];

static CHARACTER_SCHEMA: OnceLock<SchemaTable> = OnceLock::new();

fn character_schema() -> &'static SchemaTable {
    CHARACTER_SCHEMA.get_or_init(|| SchemaTable {
        fields: vec![
            FieldSpec::required("name", TypeContract::Scalar(ValueKind::String)),
            FieldSpec::required(
                "nickname",
                TypeContract::Union(&[ValueKind::String, ValueKind::Null]),
            ),
            FieldSpec::required("species", TypeContract::Scalar(ValueKind::String)),
            FieldSpec::required("dnd_class", TypeContract::Scalar(ValueKind::String)),
            FieldSpec::required("level", TypeContract::Scalar(ValueKind::Integer)),
            FieldSpec::required("ability_scores", TypeContract::Mapping(None)),
            FieldSpec::required("equipment", TypeContract::Mapping(None)),
            FieldSpec::required("known_spells", TypeContract::sequence_of(ValueKind::String)),
            FieldSpec::required("background", TypeContract::Scalar(ValueKind::String)),
            FieldSpec::required("backstory", TypeContract::Scalar(ValueKind::String)),
            FieldSpec::required("relationships", TypeContract::mapping_of(ValueKind::String)),
        ],
        rules: vec![
            check_name_charset,
            check_level_range,
            check_equipment,
            check_known_spells,
            check_ability_scores,
            check_relationships,
        ],
    })
}

fn file_prefix(ctx: &RuleContext<'_>) -> String {
    if ctx.source_path.is_empty() {
        String::new()
    } else {
        format!("{}: ", ctx.source_path)
    }
}

fn check_name_charset(doc: &Map<String, Value>, ctx: &RuleContext<'_>, d: &mut Diagnostics) {
    let name = doc.get("name").and_then(Value::as_str).unwrap_or("");
    if name.chars().any(|c| DISALLOWED_NAME_CHARS.contains(c)) {
        d.push(format!(
            "{}Strange characters are not allowed in character name. Please use another name \
             (disallowed: {DISALLOWED_NAME_CHARS}). Name: '{name}'",
            file_prefix(ctx)
        ));
    }
}

fn check_level_range(doc: &Map<String, Value>, ctx: &RuleContext<'_>, d: &mut Diagnostics) {
    let Some(level) = doc.get("level").and_then(Value::as_i64) else {
        return;
    };
    if !(1..=20).contains(&level) {
        d.push(format!(
            "{}Level must be between 1 and 20, got {level}",
            file_prefix(ctx)
        ));
    }
}

fn check_equipment(doc: &Map<String, Value>, ctx: &RuleContext<'_>, d: &mut Diagnostics) {
    let Some(Value::Object(equipment)) = doc.get("equipment") else {
        return;
    };
    for field in EQUIPMENT_FIELDS {
        match equipment.get(*field) {
            None => d.push(format!(
                "{}Equipment missing required field: '{field}'",
                file_prefix(ctx)
            )),
            Some(value) if !value.is_array() => d.push(format!(
                "{}Equipment field '{field}' should be sequence, got {}",
                file_prefix(ctx),
                ValueKind::of(value)
            )),
            Some(_) => {}
        }
    }
}

fn check_known_spells(doc: &Map<String, Value>, ctx: &RuleContext<'_>, d: &mut Diagnostics) {
    let Some(Value::Array(spells)) = doc.get("known_spells") else {
        return;
    };
    let contract = TypeContract::Scalar(ValueKind::String);
    if check::first_sequence_mismatch(spells, &contract).is_some() {
        d.push(format!(
            "{}All items in 'known_spells' must be strings",
            file_prefix(ctx)
        ));
    }
}

fn check_ability_scores(doc: &Map<String, Value>, ctx: &RuleContext<'_>, d: &mut Diagnostics) {
    let Some(Value::Object(scores)) = doc.get("ability_scores") else {
        return;
    };
    for ability in ABILITY_NAMES {
        match scores.get(*ability) {
            None => d.push(format!(
                "{}Missing ability score: '{ability}'",
                file_prefix(ctx)
            )),
            Some(value) if ValueKind::of(value) != ValueKind::Integer => d.push(format!(
                "{}Ability score '{ability}' must be an integer",
                file_prefix(ctx)
            )),
            Some(_) => {}
        }
    }
}

/// One message covering the whole map, unlike the NPC validator's per-key
/// reporting. JSON keys are always strings, so only values can offend.
fn check_relationships(doc: &Map<String, Value>, ctx: &RuleContext<'_>, d: &mut Diagnostics) {
    let Some(Value::Object(relationships)) = doc.get("relationships") else {
        return;
    };
    let contract = TypeContract::Scalar(ValueKind::String);
    if !check::mapping_value_mismatches(relationships, &contract).is_empty() {
        d.push(format!(
            "{}All keys and values in 'relationships' must be strings",
            file_prefix(ctx)
        ));
    }
}

fn render_issue(issue: &FieldIssue<'_>, prefix: &str) -> String {
    match issue {
        FieldIssue::Missing { field } => {
            format!("{prefix}Missing required field: '{field}'")
        }
        FieldIssue::WrongKind { field, expected, got } => {
            format!("{prefix}Field '{field}' should be {expected}, got {got}")
        }
    }
}

/// Validate a parsed character profile. Pure and non-throwing.
pub fn validate_character(document: &Value, source_path: &str) -> ValidationOutcome {
    let mut diagnostics = Diagnostics::new();

    let Some(doc) = document.as_object() else {
        diagnostics.push(format!(
            "Character profile must be a mapping, got {}",
            ValueKind::of(document)
        ));
        return ValidationOutcome::from_diagnostics(diagnostics);
    };

    let ctx = RuleContext { source_path, sibling_dir: None };
    let prefix = file_prefix(&ctx);

    let schema = character_schema();
    for issue in schema.field_issues(doc) {
        diagnostics.push(render_issue(&issue, &prefix));
    }
    schema.apply_rules(doc, &ctx, &mut diagnostics);

    ValidationOutcome::from_diagnostics(diagnostics)
}

/// Validate a character profile file. Load failures become a single
/// diagnostic and short-circuit the structural checks.
pub fn validate_character_file(path: &Path) -> ValidationOutcome {
    match loader::load_document(path) {
        Ok(document) => validate_character(&document, &path.display().to_string()),
        Err(error) => ValidationOutcome::from_diagnostics(Diagnostics::single(error.to_string())),
    }
}
