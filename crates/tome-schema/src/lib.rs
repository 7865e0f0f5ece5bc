//! # tome-schema — Campaign Document Validation
//!
//! The validation engine for Tome campaign documents. Walks parsed JSON
//! documents against declarative field-contract tables, accumulates every
//! violation into an ordered diagnostic sequence, and checks referential
//! integrity between party rosters and character files.
//!
//! ## Document Kinds
//!
//! - [`npc::validate_npc`] / [`npc::validate_npc_file`] — NPC profiles.
//! - [`character::validate_character`] — player-character profiles.
//! - [`party::validate_party`] — party rosters, including the cross
//!   reference check against the character directory.
//! - [`items::validate_items`] — the custom-items registry.
//!
//! ## Escalation Policies
//!
//! NPC, character, and items validation return a [`ValidationOutcome`]
//! unconditionally; callers decide what a failure means. Party validation
//! raises [`party::PartyValidationError`] whenever any diagnostic exists.
//! Both shapes are load-bearing caller contracts; see the `party` module
//! docs before unifying them.
//!
//! ## Crate Policy
//!
//! - Depends only on `tome-core` internally.
//! - Validators never mutate documents, never deduplicate diagnostics,
//!   and never stop at the first failing field.
//! - Schemas are plain immutable data ([`SchemaTable`]), built once per
//!   process and shared by every validation call.

pub mod character;
pub mod check;
pub mod contract;
pub mod crossref;
pub mod diagnostics;
pub mod items;
pub mod loader;
pub mod npc;
pub mod party;

pub use character::{validate_character, validate_character_file};
pub use check::ShapeMismatch;
pub use contract::{FieldIssue, FieldSpec, RuleContext, SchemaTable, TypeContract, ValueKind};
pub use diagnostics::{Diagnostics, ValidationOutcome};
pub use items::{validate_items, validate_items_file};
pub use loader::{load_document, DocumentLoadError};
pub use npc::{validate_npc, validate_npc_file};
pub use party::{validate_party, validate_party_file, PartyValidationError};
