//! # tome-core — Foundational Types for Tome
//!
//! The leaf crate of the Tome workspace. It defines the pieces every other
//! crate leans on: the error hierarchy, campaign timestamp parsing, and the
//! `game_data/` directory conventions shared by validators and the CLI.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tome-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod paths;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::TomeError;
pub use temporal::Timestamp;
