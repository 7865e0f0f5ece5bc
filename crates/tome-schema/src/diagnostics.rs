//! # Diagnostics — Ordered Violation Collection
//!
//! One validation run produces one ordered, append-only sequence of
//! human-readable violation messages. Identity is positional: messages are
//! not deduplicated and carry no severity. `Display` renders one message
//! per line, in discovery order, so the collection can be embedded
//! directly in aggregate error text.

use std::fmt;

/// Ordered collection of validation diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection holding a single message.
    pub fn single(message: impl Into<String>) -> Self {
        Self { messages: vec![message.into()] }
    }

    /// Append one message.
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// All messages, in discovery order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{message}")?;
        }
        Ok(())
    }
}

/// Result of one validation run.
///
/// Invariant: `is_valid()` holds exactly when the diagnostic sequence is
/// empty. The constructor enforces this; there is no way to build a
/// "valid" outcome that still carries diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    valid: bool,
    diagnostics: Diagnostics,
}

impl ValidationOutcome {
    /// Package collected diagnostics into an outcome.
    pub fn from_diagnostics(diagnostics: Diagnostics) -> Self {
        Self { valid: diagnostics.is_empty(), diagnostics }
    }

    /// An outcome with no diagnostics.
    pub fn ok() -> Self {
        Self::from_diagnostics(Diagnostics::new())
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Diagnostic messages in discovery order; empty iff valid.
    pub fn diagnostics(&self) -> &[String] {
        self.diagnostics.messages()
    }

    /// Consumes self and returns the diagnostic collection.
    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_preserved() {
        let mut d = Diagnostics::new();
        d.push("first");
        d.push("second");
        d.push("first");
        assert_eq!(d.messages(), ["first", "second", "first"]);
    }

    #[test]
    fn test_display_one_message_per_line() {
        let mut d = Diagnostics::new();
        d.push("a");
        d.push("b");
        assert_eq!(d.to_string(), "a\nb");
    }

    #[test]
    fn test_outcome_invariant() {
        assert!(ValidationOutcome::ok().is_valid());

        let outcome = ValidationOutcome::from_diagnostics(Diagnostics::single("bad"));
        assert!(!outcome.is_valid());
        assert_eq!(outcome.diagnostics(), ["bad"]);
    }
}
