//! Non-fatal findings produced while parsing a table definition.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A line that no pattern recognizes; it was skipped.
    UnknownSchemaContent,
    /// A column line that neither column pattern matches; it was skipped.
    UnknownColumnDefinition,
    /// A column line recovered only by the loose fallback pattern.
    IncompleteColumnDefinition,
    /// A column whose type name is not recognized.
    UnrecognizedColumnType,
}

/// A warning about one line of reflected text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// 1-based line number within the parsed text.
    pub line_number: usize,
    /// The offending line, verbatim.
    pub line: String,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic with the standard message for `kind`.
    #[must_use]
    pub fn new(kind: DiagnosticKind, line_number: usize, line: impl Into<String>) -> Self {
        let line = line.into();
        let message = match kind {
            DiagnosticKind::UnknownSchemaContent => format!("Unknown schema content: {line:?}"),
            DiagnosticKind::UnknownColumnDefinition => {
                format!("Unknown column definition {line:?}")
            }
            DiagnosticKind::IncompleteColumnDefinition => {
                format!("Incomplete reflection of column definition {line:?}")
            }
            DiagnosticKind::UnrecognizedColumnType => {
                format!("Did not recognize type of column in {line:?}")
            }
        };
        Self {
            kind,
            line_number,
            line,
            message,
        }
    }

    /// Replaces the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.message)
    }
}
