//! SingleStore dialect.

use super::Dialect;
use crate::error::Result;
use crate::quoting::IdentifierQuoting;
use crate::reflection::PatternTable;

/// SingleStore: the MySQL family plus shard, sort and vector keys, column
/// groups and inline table options.
///
/// With `ANSI_QUOTES` in the server's SQL mode identifiers are quoted
/// with `"` instead of backticks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SingleStoreDialect {
    ansi_quotes: bool,
}

impl SingleStoreDialect {
    /// Creates a dialect with backtick quoting.
    #[must_use]
    pub const fn new() -> Self {
        Self { ansi_quotes: false }
    }

    /// Sets whether the server runs with `ANSI_QUOTES`.
    #[must_use]
    pub const fn with_ansi_quotes(mut self, ansi_quotes: bool) -> Self {
        self.ansi_quotes = ansi_quotes;
        self
    }

    /// Returns `true` if identifiers are quoted with `"`.
    #[must_use]
    pub const fn ansi_quotes(&self) -> bool {
        self.ansi_quotes
    }
}

impl Dialect for SingleStoreDialect {
    fn name(&self) -> &'static str {
        "singlestore"
    }

    fn identifier_quote(&self) -> char {
        if self.ansi_quotes {
            '"'
        } else {
            '`'
        }
    }

    fn pattern_table(&self, quoting: &IdentifierQuoting) -> Result<PatternTable> {
        PatternTable::singlestore(quoting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::LineKind;
    use crate::schema::KeyKind;

    #[test]
    fn test_singlestore_dialect() {
        let dialect = SingleStoreDialect::new();
        assert_eq!(dialect.name(), "singlestore");
        assert_eq!(dialect.quoting().unwrap(), IdentifierQuoting::backtick());
        assert_eq!(
            dialect.with_ansi_quotes(true).quoting().unwrap(),
            IdentifierQuoting::ansi()
        );
        assert_eq!(
            dialect.with_ansi_quotes(true).quote_identifier("a\"b").unwrap(),
            "\"a\"\"b\""
        );
    }

    #[test]
    fn test_extensions_precede_generic_key() {
        let dialect = SingleStoreDialect::new();
        let quoting = dialect.quoting().unwrap();
        let kinds = dialect.pattern_table(&quoting).unwrap().kinds();
        let key = kinds.iter().position(|k| *k == LineKind::Key).unwrap();
        for kind in [LineKind::ShardKey, LineKind::SortKey, LineKind::VectorIndex] {
            assert!(kinds.iter().position(|k| *k == kind).unwrap() < key);
        }
    }

    #[test]
    fn test_ansi_parser() {
        let parser = SingleStoreDialect::new()
            .with_ansi_quotes(true)
            .table_definition_parser()
            .unwrap();
        let reflection = parser.parse(
            "CREATE TABLE \"t\" (\n  \"a\"\"b\" int(11) NOT NULL,\n  SHARD KEY (\"a\"\"b\")\n)",
            "utf8mb4",
        );
        assert!(reflection.is_clean(), "{:?}", reflection.diagnostics);
        assert_eq!(reflection.table.columns[0].name, "a\"b");
        let shard = reflection.table.shard_key().unwrap();
        assert_eq!(shard.kind, KeyKind::Shard);
        assert_eq!(shard.column_names(), vec!["a\"b"]);
    }
}
