//! Error types for the `s2ddl` tool.

/// Errors that can occur while reading, fetching or printing a table
/// definition.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Database error while fetching a definition.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error (reading the input file or stdin).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error while printing JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The parser could not be configured.
    #[error("Parser configuration error: {0}")]
    Parser(#[from] singlestore_ddl::Error),

    /// The table name is empty or has too many qualifiers.
    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    /// The server returned no row for `SHOW CREATE TABLE`.
    #[error("SHOW CREATE TABLE returned no definition for '{0}'")]
    EmptyResult(String),

    /// Diagnostics were reported and strict mode is on.
    #[error("{0} diagnostic(s) reported in strict mode")]
    Strict(usize),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
