//! Printing reflected definitions.

use clap::ValueEnum;
use singlestore_ddl::ddl::DdlRenderer;
use singlestore_ddl::reflection::Reflection;

use crate::error::Result;

/// How a reflected table is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON of the parsed definition.
    #[default]
    Json,
    /// The definition rendered back to `CREATE TABLE` text.
    Sql,
}

/// Formats the table of `reflection`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_reflection(
    reflection: &Reflection,
    format: OutputFormat,
    renderer: &DdlRenderer,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&reflection.table)?),
        OutputFormat::Sql => Ok(renderer.create_table(&reflection.table)),
    }
}
