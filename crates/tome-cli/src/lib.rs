//! # tome-cli — Tome Command-Line Interface
//!
//! Report-printing front end for the validation engine. One subcommand so
//! far:
//!
//! - `validate` — single-document or whole-workspace validation sweeps
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `tome-schema` — no validation logic
//!   lives here, only discovery, report rendering, and exit-code mapping.

pub mod validate;
