//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout Tome. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! Data-quality problems found while validating a document are *not* errors
//! in this hierarchy — they travel as diagnostics in
//! `tome_schema::Diagnostics`. `TomeError` covers the infrastructure layer:
//! timestamps that cannot be parsed, serialization failures, and IO.

use thiserror::Error;

/// Top-level error type for Tome.
#[derive(Error, Debug)]
pub enum TomeError {
    /// Schema validation failure outside the diagnostic pipeline.
    #[error("schema validation error: {0}")]
    SchemaValidation(String),

    /// A timestamp string could not be parsed.
    #[error("invalid timestamp: {0}")]
    Timestamp(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
