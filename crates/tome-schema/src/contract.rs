//! # Schema Contracts — Field Tables as Data
//!
//! The schema registry: per document kind, an ordered table of field
//! name → expected-type contract plus the document-specific semantic
//! rules. Contracts are plain immutable data built once per process (no
//! runtime type objects, no introspection), so the same representation
//! serves the shape checker, the structural validators, and any future
//! document kinds.

use std::fmt;
use std::path::Path;

use serde_json::{Map, Value};

use crate::diagnostics::Diagnostics;

/// Characters that are never allowed in a document's `name` field.
/// Shell metacharacters and path separators; campaign names end up in
/// file names and in prompts handed to downstream tooling.
pub const DISALLOWED_NAME_CHARS: &str = r#"'"`$%&|<>/\"#;

/// Runtime kind of a JSON value, used on both sides of
/// "expected X, got Y" diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Sequence,
    Mapping,
}

impl ValueKind {
    /// Classify a JSON value. Whole numbers classify as `Integer`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
        }
    }

    /// Stable lower-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }

    /// Whether a value of this runtime kind satisfies an expected kind.
    /// Integers satisfy `Number`; the reverse does not hold.
    pub fn satisfies(self, expected: ValueKind) -> bool {
        self == expected || (expected == ValueKind::Number && self == ValueKind::Integer)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expected type/shape for one field's value.
#[derive(Debug, Clone)]
pub enum TypeContract {
    /// Exactly one scalar or container kind.
    Scalar(ValueKind),
    /// Any of the listed kinds (e.g. string-or-null).
    Union(&'static [ValueKind]),
    /// A mapping; the optional inner contract constrains every value,
    /// keys are unconstrained.
    Mapping(Option<Box<TypeContract>>),
    /// A sequence whose every element must satisfy the inner contract.
    SequenceOf(Box<TypeContract>),
}

impl TypeContract {
    /// Convenience constructor for a sequence of one scalar kind.
    pub fn sequence_of(kind: ValueKind) -> Self {
        Self::SequenceOf(Box::new(Self::Scalar(kind)))
    }

    /// Convenience constructor for a mapping whose values are one scalar kind.
    pub fn mapping_of(kind: ValueKind) -> Self {
        Self::Mapping(Some(Box::new(Self::Scalar(kind))))
    }

    /// The name rendered on the "expected" side of diagnostics.
    pub fn expected_name(&self) -> String {
        match self {
            Self::Scalar(kind) => kind.name().to_string(),
            Self::Union(kinds) => kinds
                .iter()
                .map(|k| k.name())
                .collect::<Vec<_>>()
                .join(" or "),
            Self::Mapping(_) => ValueKind::Mapping.name().to_string(),
            Self::SequenceOf(_) => ValueKind::Sequence.name().to_string(),
        }
    }

    /// Shallow test: does the value's outermost kind satisfy this contract?
    ///
    /// Container element checks are separate (see [`crate::check`]) so that
    /// a wrong-kind container yields exactly one table-level diagnostic and
    /// element diagnostics only appear once the container kind matched.
    pub fn kind_matches(&self, value: &Value) -> bool {
        let got = ValueKind::of(value);
        match self {
            Self::Scalar(kind) => got.satisfies(*kind),
            Self::Union(kinds) => kinds.iter().any(|k| got.satisfies(*k)),
            Self::Mapping(_) => got == ValueKind::Mapping,
            Self::SequenceOf(_) => got == ValueKind::Sequence,
        }
    }
}

/// One entry in a document kind's field table.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub contract: TypeContract,
    pub required: bool,
}

impl FieldSpec {
    pub fn required(name: &'static str, contract: TypeContract) -> Self {
        Self { name, contract, required: true }
    }
}

/// Call-scoped context handed to semantic rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleContext<'a> {
    /// Originating file path, used verbatim in messages. Empty when the
    /// document did not come from a file.
    pub source_path: &'a str,
    /// Directory of sibling documents for cross-reference checks.
    pub sibling_dir: Option<&'a Path>,
}

/// A document-specific semantic rule: inspects the document mapping and
/// appends any violations. Rules run after the field table and must stay
/// independent of one another.
pub type SemanticRule = fn(&Map<String, Value>, &RuleContext<'_>, &mut Diagnostics);

/// A table-level issue found by [`SchemaTable::field_issues`].
///
/// Kept structural so each validator renders its own message phrasing.
#[derive(Debug)]
pub enum FieldIssue<'a> {
    Missing {
        field: &'a str,
    },
    WrongKind {
        field: &'a str,
        expected: String,
        got: ValueKind,
    },
}

impl FieldIssue<'_> {
    /// Standard phrasing, shared by the NPC, party, and items validators.
    /// The character validator renders its own variant.
    pub fn to_message(&self) -> String {
        match self {
            Self::Missing { field } => format!("Missing required field: {field}"),
            Self::WrongKind { field, expected, got } => {
                format!("Field '{field}' must be of type {expected}, got {got}")
            }
        }
    }
}

/// A document kind's full schema: the ordered field table plus its
/// semantic rules.
pub struct SchemaTable {
    pub fields: Vec<FieldSpec>,
    pub rules: Vec<SemanticRule>,
}

impl SchemaTable {
    /// Presence and top-level kind checks for every field in table order.
    ///
    /// These run unconditionally and independently of all semantic rules:
    /// a malformed container still gets its table-level wrong-kind issue,
    /// and a missing field never suppresses checks on its neighbors.
    pub fn field_issues<'a>(&'a self, doc: &Map<String, Value>) -> Vec<FieldIssue<'a>> {
        let mut issues = Vec::new();
        for spec in &self.fields {
            match doc.get(spec.name) {
                None => {
                    if spec.required {
                        issues.push(FieldIssue::Missing { field: spec.name });
                    }
                }
                Some(value) => {
                    if !spec.contract.kind_matches(value) {
                        issues.push(FieldIssue::WrongKind {
                            field: spec.name,
                            expected: spec.contract.expected_name(),
                            got: ValueKind::of(value),
                        });
                    }
                }
            }
        }
        issues
    }

    /// Run every semantic rule in table order.
    pub fn apply_rules(
        &self,
        doc: &Map<String, Value>,
        ctx: &RuleContext<'_>,
        diagnostics: &mut Diagnostics,
    ) {
        for rule in &self.rules {
            rule(doc, ctx, diagnostics);
        }
    }

    /// Look up a field's contract by name.
    pub fn contract_for(&self, name: &str) -> Option<&TypeContract> {
        self.fields
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| &spec.contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_kind_classification() {
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Boolean);
        assert_eq!(ValueKind::of(&json!(3)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(3.5)), ValueKind::Number);
        assert_eq!(ValueKind::of(&json!("x")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([])), ValueKind::Sequence);
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Mapping);
    }

    #[test]
    fn test_integer_satisfies_number() {
        assert!(ValueKind::Integer.satisfies(ValueKind::Number));
        assert!(!ValueKind::Number.satisfies(ValueKind::Integer));
    }

    #[test]
    fn test_union_expected_name() {
        let contract = TypeContract::Union(&[ValueKind::String, ValueKind::Null]);
        assert_eq!(contract.expected_name(), "string or null");
    }

    #[test]
    fn test_union_kind_matches_either_member() {
        let contract = TypeContract::Union(&[ValueKind::String, ValueKind::Null]);
        assert!(contract.kind_matches(&json!("alias")));
        assert!(contract.kind_matches(&json!(null)));
        assert!(!contract.kind_matches(&json!(7)));
    }

    #[test]
    fn test_container_kind_match_is_shallow() {
        let contract = TypeContract::sequence_of(ValueKind::String);
        // Element kinds are not inspected at table level.
        assert!(contract.kind_matches(&json!([1, 2, 3])));
        assert!(!contract.kind_matches(&json!("not a sequence")));
    }

    #[test]
    fn test_field_issues_reports_every_field_independently() {
        let table = SchemaTable {
            fields: vec![
                FieldSpec::required("name", TypeContract::Scalar(ValueKind::String)),
                FieldSpec::required("recurring", TypeContract::Scalar(ValueKind::Boolean)),
            ],
            rules: vec![],
        };
        let doc = json!({"recurring": "yes"});
        let issues = table.field_issues(doc.as_object().unwrap());
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], FieldIssue::Missing { field: "name" }));
        assert!(matches!(
            issues[1],
            FieldIssue::WrongKind { field: "recurring", got: ValueKind::String, .. }
        ));
    }

    #[test]
    fn test_optional_field_absent_is_clean() {
        let table = SchemaTable {
            fields: vec![FieldSpec {
                name: "notes",
                contract: TypeContract::Scalar(ValueKind::String),
                required: false,
            }],
            rules: vec![],
        };
        let doc = json!({});
        assert!(table.field_issues(doc.as_object().unwrap()).is_empty());
    }
}
