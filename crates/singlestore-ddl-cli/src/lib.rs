//! Inspect SingleStore `SHOW CREATE TABLE` output.
//!
//! `s2ddl` parses a table definition, either saved to a file or fetched
//! from a live server, and prints it as JSON or as re-rendered DDL.
//! Lines the parser does not understand are logged as warnings on
//! stderr; with `--strict` they make the command fail.
//!
//! # CLI Usage
//!
//! ```bash
//! # Parse a saved definition
//! s2ddl parse orders.sql
//!
//! # Parse from stdin and print DDL
//! mysql -N -e 'SHOW CREATE TABLE orders' | cut -f2 | s2ddl --format sql parse -
//!
//! # Fetch from a server
//! DATABASE_URL=mysql://root@localhost:3306/shop s2ddl fetch orders
//! ```

pub mod error;
pub mod fetch;
pub mod output;

use std::io::Read;
use std::path::Path;

use singlestore_ddl::ddl::DdlRenderer;
use singlestore_ddl::dialect::{Dialect, SingleStoreDialect};
use singlestore_ddl::reflection::Reflection;

use crate::error::{CliError, Result};
use crate::output::{format_reflection, OutputFormat};

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct ReflectOptions {
    /// Character set recorded on the parsed table.
    pub charset: String,
    /// Identifier quoting of the input.
    pub dialect: SingleStoreDialect,
    /// Output format.
    pub format: OutputFormat,
    /// Fail when any diagnostic is reported.
    pub strict: bool,
}

impl Default for ReflectOptions {
    fn default() -> Self {
        Self {
            charset: String::from("utf8mb4"),
            dialect: SingleStoreDialect::new(),
            format: OutputFormat::default(),
            strict: false,
        }
    }
}

/// Reads the input text from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns an error if reading fails.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Parses `text` with the dialect of `options`.
///
/// # Errors
///
/// Returns an error if the parser cannot be built.
pub fn reflect(text: &str, options: &ReflectOptions) -> Result<Reflection> {
    let parser = options.dialect.table_definition_parser()?;
    Ok(parser.parse(text, &options.charset))
}

/// Fails in strict mode when `reflection` carries diagnostics.
///
/// # Errors
///
/// Returns [`CliError::Strict`] with the diagnostic count.
pub fn check_strict(reflection: &Reflection, strict: bool) -> Result<()> {
    if strict && !reflection.is_clean() {
        return Err(CliError::Strict(reflection.diagnostics.len()));
    }
    Ok(())
}

/// Parses `text` and formats the result.
///
/// # Errors
///
/// Returns an error if the parser cannot be built, strict mode rejects
/// the result or formatting fails.
pub fn run(text: &str, options: &ReflectOptions) -> Result<String> {
    let reflection = reflect(text, options)?;
    check_strict(&reflection, options.strict)?;
    let renderer = DdlRenderer::for_dialect(&options.dialect)?;
    format_reflection(&reflection, options.format, &renderer)
}
