//! # Party Roster Validation
//!
//! Structural validation for the current-party roster, plus the
//! cross-reference check against the character directory.
//!
//! ## Escalation Policy
//!
//! Unlike the NPC validator, party validation **raises**: any diagnostic
//! at all turns into `Err(PartyValidationError)` carrying the whole
//! collection as one multi-line message, and `Ok` is reserved for the
//! all-clear outcome. Callers of party validation expect a hard failure,
//! so the asymmetry is kept as two distinct entry-point shapes rather
//! than normalized.
//!
//! The one exception: *load* failures in
//! [`validate_party_file`] (missing file, unreadable file, malformed JSON)
//! come back as an invalid outcome with a single diagnostic, not as an
//! error. Only data-quality findings escalate.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use serde_json::{Map, Value};
use thiserror::Error;
use tome_core::temporal::Timestamp;

use crate::contract::{FieldSpec, RuleContext, SchemaTable, TypeContract, ValueKind};
use crate::crossref;
use crate::diagnostics::{Diagnostics, ValidationOutcome};
use crate::loader;

/// Aggregate error raised when a party roster fails validation.
///
/// Carries every diagnostic from the run; the rendered message is the
/// inherited header line followed by one diagnostic per line.
#[derive(Error, Debug)]
#[error("The names of the party members are incorrect, please check them.\n{diagnostics}")]
pub struct PartyValidationError {
    /// All violations, in discovery order.
    pub diagnostics: Diagnostics,
}

static PARTY_SCHEMA: OnceLock<SchemaTable> = OnceLock::new();

fn party_schema() -> &'static SchemaTable {
    PARTY_SCHEMA.get_or_init(|| SchemaTable {
        fields: vec![
            FieldSpec::required("party_members", TypeContract::sequence_of(ValueKind::String)),
            FieldSpec::required("last_updated", TypeContract::Scalar(ValueKind::String)),
        ],
        rules: vec![check_party_members, check_last_updated],
    })
}

/// Non-empty, per-element, duplicate, and cross-reference checks. All run
/// within one pass so the empty-list diagnostic accompanies (rather than
/// replaces) the per-element findings.
fn check_party_members(doc: &Map<String, Value>, ctx: &RuleContext<'_>, d: &mut Diagnostics) {
    let Some(Value::Array(members)) = doc.get("party_members") else {
        return;
    };

    if members.is_empty() {
        d.push("party_members list is empty - party must have at least one member");
    }

    for (index, member) in members.iter().enumerate() {
        match member.as_str() {
            None => d.push(format!(
                "party_members[{index}] must be a string, got {}",
                ValueKind::of(member)
            )),
            Some(s) if s.trim().is_empty() => {
                d.push(format!("party_members[{index}] is an empty string"));
            }
            Some(_) => {}
        }
    }

    // Duplicates by exact string equality, reported once no matter how
    // many there are. Non-string members were already flagged above.
    let strings: Vec<&str> = members.iter().filter_map(Value::as_str).collect();
    let unique: HashSet<&str> = strings.iter().copied().collect();
    if unique.len() != strings.len() {
        d.push("party_members contains duplicate entries");
    }

    if let Some(dir) = ctx.sibling_dir {
        crossref::check_membership(members, dir, d);
    }
}

fn check_last_updated(doc: &Map<String, Value>, _ctx: &RuleContext<'_>, d: &mut Diagnostics) {
    let Some(Value::String(value)) = doc.get("last_updated") else {
        return;
    };
    if Timestamp::parse_lenient(value).is_err() {
        d.push(format!(
            "last_updated must be a valid ISO format timestamp, got: '{value}'"
        ));
    }
}

/// Validate a parsed party roster.
///
/// `characters_dir`, when supplied, enables the cross-reference check:
/// every member must name a character document in that directory. The
/// check is skipped when the directory is missing or yields no identities.
///
/// # Errors
///
/// Returns [`PartyValidationError`] aggregating every diagnostic whenever
/// any check fails.
pub fn validate_party(
    document: &Value,
    source_path: &str,
    characters_dir: Option<&Path>,
) -> Result<ValidationOutcome, PartyValidationError> {
    let mut diagnostics = Diagnostics::new();

    let Some(doc) = document.as_object() else {
        diagnostics.push(format!(
            "Party roster must be a mapping, got {}",
            ValueKind::of(document)
        ));
        return Err(PartyValidationError { diagnostics });
    };

    let schema = party_schema();
    for issue in schema.field_issues(doc) {
        diagnostics.push(issue.to_message());
    }

    let ctx = RuleContext { source_path, sibling_dir: characters_dir };
    schema.apply_rules(doc, &ctx, &mut diagnostics);

    if diagnostics.is_empty() {
        Ok(ValidationOutcome::ok())
    } else {
        Err(PartyValidationError { diagnostics })
    }
}

/// Validate the party roster file at `path`.
///
/// Load failures come back as an invalid [`ValidationOutcome`] holding a
/// single diagnostic; structural checks are skipped for a document that
/// never parsed. Data-quality findings escalate per [`validate_party`].
pub fn validate_party_file(
    path: &Path,
    characters_dir: Option<&Path>,
) -> Result<ValidationOutcome, PartyValidationError> {
    match loader::load_document(path) {
        Ok(document) => validate_party(&document, &path.display().to_string(), characters_dir),
        Err(error) => Ok(ValidationOutcome::from_diagnostics(Diagnostics::single(
            error.to_string(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_party() -> Value {
        json!({
            "party_members": ["Elara", "Finn", "Shadowstep"],
            "last_updated": "2024-05-01T10:00:00"
        })
    }

    #[test]
    fn test_valid_party_returns_ok() {
        let outcome = validate_party(&sample_party(), "", None).unwrap();
        assert!(outcome.is_valid());
        assert!(outcome.diagnostics().is_empty());
    }

    #[test]
    fn test_missing_field_raises() {
        let party = json!({"party_members": ["Elara"]});
        let error = validate_party(&party, "", None).unwrap_err();
        assert_eq!(
            error.diagnostics.messages(),
            ["Missing required field: last_updated"]
        );
    }

    #[test]
    fn test_error_display_aggregates() {
        let party = json!({"party_members": [], "last_updated": "2024-13-01"});
        let error = validate_party(&party, "", None).unwrap_err();
        let rendered = error.to_string();
        assert!(rendered
            .starts_with("The names of the party members are incorrect, please check them.\n"));
        assert!(rendered.contains("party_members list is empty"));
        assert!(rendered.contains("last_updated must be a valid ISO format timestamp"));
    }

    #[test]
    fn test_wrong_field_kinds() {
        let party = json!({"party_members": "not a list", "last_updated": 12345});
        let error = validate_party(&party, "", None).unwrap_err();
        let messages = error.diagnostics.messages();
        assert!(messages
            .contains(&"Field 'party_members' must be of type sequence, got string".to_string()));
        assert!(messages
            .contains(&"Field 'last_updated' must be of type string, got integer".to_string()));
    }

    #[test]
    fn test_empty_member_list_flagged() {
        let party = json!({"party_members": [], "last_updated": "2024-05-01T10:00:00"});
        let error = validate_party(&party, "", None).unwrap_err();
        assert_eq!(
            error.diagnostics.messages(),
            ["party_members list is empty - party must have at least one member"]
        );
    }

    #[test]
    fn test_member_element_checks_carry_index() {
        let party = json!({
            "party_members": ["Elara", 7, "   "],
            "last_updated": "2024-05-01T10:00:00"
        });
        let error = validate_party(&party, "", None).unwrap_err();
        let messages = error.diagnostics.messages();
        assert!(messages
            .contains(&"party_members[1] must be a string, got integer".to_string()));
        assert!(messages.contains(&"party_members[2] is an empty string".to_string()));
    }

    #[test]
    fn test_duplicates_reported_exactly_once() {
        let party = json!({
            "party_members": ["Elara", "Finn", "Elara", "Elara", "Finn"],
            "last_updated": "2024-05-01T10:00:00"
        });
        let error = validate_party(&party, "", None).unwrap_err();
        assert_eq!(
            error.diagnostics.messages(),
            ["party_members contains duplicate entries"]
        );
    }

    #[test]
    fn test_invalid_timestamp_echoes_value() {
        let party = json!({
            "party_members": ["Elara"],
            "last_updated": "2024-13-01"
        });
        let error = validate_party(&party, "", None).unwrap_err();
        assert_eq!(
            error.diagnostics.messages(),
            ["last_updated must be a valid ISO format timestamp, got: '2024-13-01'"]
        );
    }

    #[test]
    fn test_naive_timestamp_accepted() {
        let party = json!({
            "party_members": ["Elara"],
            "last_updated": "2024-05-01T10:00:00"
        });
        assert!(validate_party(&party, "", None).is_ok());
    }

    #[test]
    fn test_non_mapping_document_raises() {
        let error = validate_party(&json!([1, 2, 3]), "", None).unwrap_err();
        assert_eq!(
            error.diagnostics.messages(),
            ["Party roster must be a mapping, got sequence"]
        );
    }
}
