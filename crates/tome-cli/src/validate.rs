//! # Validate Subcommand
//!
//! Single-document and whole-workspace validation sweeps. Prints one
//! report per document — a pass/fail banner and an indented bullet per
//! diagnostic — and reports whether everything validated cleanly.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};

use tome_core::paths;
use tome_schema::{
    validate_character_file, validate_items_file, validate_npc_file, validate_party_file,
    ValidationOutcome,
};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Validate a single document instead of sweeping game_data/
    /// (requires --kind).
    pub file: Option<PathBuf>,

    /// Document kind of FILE.
    #[arg(long, value_enum)]
    pub kind: Option<DocumentKind>,

    /// Validate every NPC profile.
    #[arg(long)]
    pub all_npcs: bool,

    /// Validate every character profile.
    #[arg(long)]
    pub all_characters: bool,

    /// Validate the current party roster.
    #[arg(long)]
    pub party: bool,

    /// Validate the custom items registry.
    #[arg(long)]
    pub items: bool,

    /// Campaign workspace root containing game_data/.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

/// Document kinds the validate subcommand understands.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum DocumentKind {
    Npc,
    Character,
    Party,
    Items,
}

/// Run the subcommand. Returns whether every validated document passed.
///
/// Finding zero documents to validate counts as a failure: a sweep that
/// silently checks nothing would otherwise read as a clean bill of health.
pub fn run(args: &ValidateArgs) -> Result<bool> {
    if let Some(file) = &args.file {
        let Some(kind) = args.kind else {
            bail!("--kind is required when validating a single file");
        };
        return Ok(validate_one(file, kind, &args.root));
    }

    // No selection flags means sweep everything.
    let sweep_all = !(args.all_npcs || args.all_characters || args.party || args.items);
    let mut all_valid = true;
    let mut validated = 0usize;

    if args.all_npcs || sweep_all {
        for path in tome_schema::loader::list_documents(&paths::npcs_dir(&args.root)) {
            all_valid &= report(&path, &validate_npc_file(&path));
            validated += 1;
        }
    }

    if args.all_characters || sweep_all {
        for path in tome_schema::loader::list_documents(&paths::characters_dir(&args.root)) {
            all_valid &= report(&path, &validate_character_file(&path));
            validated += 1;
        }
    }

    if args.party || sweep_all {
        let party_path = paths::party_file(&args.root);
        if party_path.exists() || args.party {
            all_valid &= validate_one(&party_path, DocumentKind::Party, &args.root);
            validated += 1;
        }
    }

    if args.items || sweep_all {
        let items_path = paths::items_registry_file(&args.root);
        if items_path.exists() || args.items {
            all_valid &= validate_one(&items_path, DocumentKind::Items, &args.root);
            validated += 1;
        }
    }

    if validated == 0 {
        eprintln!(
            "No campaign documents found to validate under {}",
            paths::game_data_dir(&args.root).display()
        );
        return Ok(false);
    }

    tracing::debug!(validated, all_valid, "validation sweep finished");
    Ok(all_valid)
}

fn validate_one(path: &Path, kind: DocumentKind, root: &Path) -> bool {
    match kind {
        DocumentKind::Npc => report(path, &validate_npc_file(path)),
        DocumentKind::Character => report(path, &validate_character_file(path)),
        DocumentKind::Items => report(path, &validate_items_file(path)),
        DocumentKind::Party => {
            let characters_dir = paths::characters_dir(root);
            match validate_party_file(path, Some(&characters_dir)) {
                Ok(outcome) => report(path, &outcome),
                Err(error) => {
                    print_failure(path, error.diagnostics.messages());
                    false
                }
            }
        }
    }
}

/// Print one document's report. Returns whether it was valid.
fn report(path: &Path, outcome: &ValidationOutcome) -> bool {
    if outcome.is_valid() {
        println!("✓ {}: Valid", path.display());
        true
    } else {
        print_failure(path, outcome.diagnostics());
        false
    }
}

fn print_failure(path: &Path, diagnostics: &[String]) {
    println!("✗ {}: INVALID", path.display());
    for message in diagnostics {
        println!("  - {message}");
    }
}
