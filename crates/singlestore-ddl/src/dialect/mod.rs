//! SQL dialect support.
//!
//! A dialect decides how identifiers are quoted and which key and
//! constraint patterns its `SHOW CREATE TABLE` output can contain. The
//! MySQL family shares one generic pattern table; SingleStore extends it.

mod mysql;
mod singlestore;

pub use mysql::MySqlDialect;
pub use singlestore::SingleStoreDialect;

use crate::error::Result;
use crate::quoting::IdentifierQuoting;
use crate::reflection::{PatternTable, TableDefinitionParser};

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character (`` ` `` for the MySQL family).
    fn identifier_quote(&self) -> char {
        '`'
    }

    /// Returns what a single quote becomes inside a string literal.
    fn string_escape(&self) -> &'static str {
        "''"
    }

    /// Returns the identifier quoting configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Dialect::identifier_quote`] cannot be used as
    /// a quote character.
    fn quoting(&self) -> Result<IdentifierQuoting> {
        let quote = self.identifier_quote();
        IdentifierQuoting::new(quote, quote, format!("{quote}{quote}"))
    }

    /// Quotes an identifier with [`Dialect::quoting`], escaping embedded
    /// quote characters.
    ///
    /// # Errors
    ///
    /// Returns an error if the quoting configuration is invalid.
    fn quote_identifier(&self, name: &str) -> Result<String> {
        Ok(self.quoting()?.quote(name))
    }

    /// Quotes a string literal.
    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', self.string_escape()))
    }

    /// Builds the key/constraint pattern table for `quoting`.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile.
    fn pattern_table(&self, quoting: &IdentifierQuoting) -> Result<PatternTable> {
        PatternTable::mysql(quoting)
    }

    /// Builds a table definition parser for this dialect.
    ///
    /// # Errors
    ///
    /// Returns an error if the quoting configuration is invalid or a
    /// pattern fails to compile.
    fn table_definition_parser(&self) -> Result<TableDefinitionParser> {
        let quoting = self.quoting()?;
        let patterns = self.pattern_table(&quoting)?;
        TableDefinitionParser::with_patterns(quoting, patterns)
    }
}
