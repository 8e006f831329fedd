//! Error types for building reflection parsers.
//!
//! Parsing itself never fails: problems with the reflected text are
//! reported as [`Diagnostic`](crate::reflection::Diagnostic)s. These
//! errors only cover configuration that makes a parser impossible to
//! construct.

/// Errors that can occur while configuring a parser or dialect.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The identifier quote character cannot delimit identifiers.
    #[error("Invalid identifier quote character {0:?}")]
    InvalidQuoteChar(char),

    /// The escape sequence does not contain the closing quote.
    #[error("Escape sequence {escape:?} must contain the closing quote {quote:?}")]
    InvalidEscape {
        /// The closing quote character.
        quote: char,
        /// The rejected escape sequence.
        escape: String,
    },

    /// A reflection pattern failed to compile.
    #[error("Failed to compile {name} pattern: {source}")]
    Pattern {
        /// Which pattern table entry failed.
        name: &'static str,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}

/// Result type for parser construction.
pub type Result<T> = std::result::Result<T, Error>;
