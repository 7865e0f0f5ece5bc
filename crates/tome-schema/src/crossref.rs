//! # Cross-Reference Resolver
//!
//! Checks a foreign-key-like list of names against the identity set built
//! from a directory of sibling documents. Sibling loading is best-effort:
//! a sibling that fails to load or parse is skipped, never surfaced as a
//! diagnostic — a partial identity set is acceptable, a missing one skips
//! the check entirely.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;

use crate::diagnostics::Diagnostics;
use crate::loader;

/// Build the identity set for a directory of character documents.
///
/// Extracts the `name` field from every loadable `.json` sibling
/// (excluding `.example.json` templates). Rebuilt on every call — the
/// directory may change between validation runs.
pub fn character_names(dir: &Path) -> HashSet<String> {
    let mut names = HashSet::new();
    for path in loader::list_documents(dir) {
        let document = match loader::load_document(&path) {
            Ok(document) => document,
            Err(error) => {
                tracing::debug!(path = %path.display(), %error, "skipping unloadable sibling");
                continue;
            }
        };
        if let Some(name) = document.get("name").and_then(Value::as_str) {
            names.insert(name.to_string());
        }
    }
    names
}

/// Check each member name against the directory's identity set.
///
/// Skipped entirely (not a failure) when the directory yields zero
/// identities. Non-string members are left to the element-type checks.
pub fn check_membership(members: &[Value], dir: &Path, diagnostics: &mut Diagnostics) {
    let known = character_names(dir);
    if known.is_empty() {
        tracing::debug!(dir = %dir.display(), "no character identities found, skipping cross-reference");
        return;
    }

    for member in members {
        if let Some(name) = member.as_str() {
            if !known.contains(name) {
                diagnostics.push(format!(
                    "Party member '{name}' does not match any character file in {}",
                    dir.display()
                ));
            }
        }
    }
}
