//! # Type/Shape Checker
//!
//! Evaluates one value against one contract. Reusable across document
//! kinds: the structural validators own the message phrasing, this module
//! owns the matching.
//!
//! Container policies differ on purpose and must not be unified:
//!
//! - Mapping value checks report **every** mismatching key
//!   ([`mapping_value_mismatches`]).
//! - Sequence homogeneity checks report only the **first** offending
//!   element, then stop scanning that list
//!   ([`first_sequence_mismatch`]).
//!
//! Both behaviors are load-bearing caller contracts.

use std::fmt;

use serde_json::{Map, Value};

use crate::contract::{TypeContract, ValueKind};

/// A single shape mismatch, rendered as "expected X, got Y".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMismatch {
    pub expected: String,
    pub got: ValueKind,
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, got {}", self.expected, self.got)
    }
}

/// Check a value's outermost kind against a contract.
///
/// Union contracts match if the value matches any member kind. Container
/// contracts match on the container kind alone; recurse explicitly with
/// [`mapping_value_mismatches`] or [`first_sequence_mismatch`] once the
/// outer kind is known good.
pub fn check_value(value: &Value, contract: &TypeContract) -> Result<(), ShapeMismatch> {
    if contract.kind_matches(value) {
        Ok(())
    } else {
        Err(ShapeMismatch {
            expected: contract.expected_name(),
            got: ValueKind::of(value),
        })
    }
}

/// Check every value of a mapping against the inner contract, returning
/// one entry per mismatching key. No early exit: callers report each
/// offending key individually.
pub fn mapping_value_mismatches<'a>(
    map: &'a Map<String, Value>,
    value_contract: &TypeContract,
) -> Vec<(&'a str, ShapeMismatch)> {
    map.iter()
        .filter_map(|(key, value)| {
            check_value(value, value_contract)
                .err()
                .map(|mismatch| (key.as_str(), mismatch))
        })
        .collect()
}

/// Scan a sequence for the first element that fails the inner contract.
///
/// Stops at the first offender: homogeneity violations are reported once
/// per list, not once per element.
pub fn first_sequence_mismatch(
    items: &[Value],
    element_contract: &TypeContract,
) -> Option<(usize, ShapeMismatch)> {
    items
        .iter()
        .enumerate()
        .find_map(|(index, item)| {
            check_value(item, element_contract)
                .err()
                .map(|mismatch| (index, mismatch))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn string_contract() -> TypeContract {
        TypeContract::Scalar(ValueKind::String)
    }

    #[test]
    fn test_check_value_match() {
        assert!(check_value(&json!("Elara"), &string_contract()).is_ok());
    }

    #[test]
    fn test_check_value_mismatch_message() {
        let err = check_value(&json!(42), &string_contract()).unwrap_err();
        assert_eq!(err.to_string(), "expected string, got integer");
    }

    #[test]
    fn test_check_value_union_accepts_null() {
        let contract = TypeContract::Union(&[ValueKind::String, ValueKind::Null]);
        assert!(check_value(&json!(null), &contract).is_ok());
        assert!(check_value(&json!("alias"), &contract).is_ok());
        let err = check_value(&json!(false), &contract).unwrap_err();
        assert_eq!(err.to_string(), "expected string or null, got boolean");
    }

    #[test]
    fn test_mapping_reports_every_bad_key() {
        let doc = json!({"a": "fine", "b": 1, "c": true});
        let map = doc.as_object().unwrap();
        let mismatches = mapping_value_mismatches(map, &string_contract());
        let keys: Vec<&str> = mismatches.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn test_sequence_reports_first_bad_element_only() {
        let items = [json!("ok"), json!(1), json!(2)];
        let found = first_sequence_mismatch(&items, &string_contract());
        let (index, mismatch) = found.unwrap();
        assert_eq!(index, 1);
        assert_eq!(mismatch.got, ValueKind::Integer);
    }

    #[test]
    fn test_sequence_all_good_is_clean() {
        let items = [json!("a"), json!("b")];
        assert!(first_sequence_mismatch(&items, &string_contract()).is_none());
    }

    #[test]
    fn test_empty_sequence_is_clean() {
        assert!(first_sequence_mismatch(&[], &string_contract()).is_none());
    }
}
