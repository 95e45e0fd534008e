//! Rendered data-manipulation statements.

use crate::kinds::Operation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rendered, ready-to-execute statement derived from exactly one record.
///
/// Statements are immutable once built; the resolved [`Operation`] is kept
/// next to the text so callers can tally a random-mix batch without
/// reparsing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    operation: Operation,
    text: String,
}

impl Statement {
    pub fn new(operation: Operation, text: impl Into<String>) -> Self {
        Self {
            operation,
            text: text.into(),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The statement text, including the trailing `;`.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Statement {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
