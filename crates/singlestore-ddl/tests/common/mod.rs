#![allow(dead_code)]

use singlestore_ddl::dialect::{Dialect, SingleStoreDialect};
use singlestore_ddl::reflection::{Reflection, TableDefinitionParser};
use singlestore_ddl::schema::{KeyKind, KeySpec, ParsedTableDefinition};

pub fn parser() -> TableDefinitionParser {
    SingleStoreDialect::new()
        .table_definition_parser()
        .unwrap_or_else(|e| panic!("Failed to build parser: {e}"))
}

pub fn ansi_parser() -> TableDefinitionParser {
    SingleStoreDialect::new()
        .with_ansi_quotes(true)
        .table_definition_parser()
        .unwrap_or_else(|e| panic!("Failed to build ANSI parser: {e}"))
}

pub fn reflect(text: &str) -> Reflection {
    parser().parse(text, "utf8mb4")
}

/// Parses `text` and fails the test if any diagnostic was reported.
pub fn parse_clean(text: &str) -> ParsedTableDefinition {
    let reflection = reflect(text);
    assert!(
        reflection.is_clean(),
        "Unexpected diagnostics for:\n{text}\n{:#?}",
        reflection.diagnostics
    );
    reflection.table
}

/// Wraps body lines in a `CREATE TABLE` header and closing line.
pub fn table_text(lines: &[&str]) -> String {
    format!("CREATE TABLE `t` (\n{}\n)", lines.join(",\n"))
}

/// Parses a single key line inside a table and returns the only key.
pub fn parse_key(line: &str) -> KeySpec {
    let table = parse_clean(&table_text(&[line]));
    match table.keys.as_slice() {
        [key] => key.clone(),
        other => panic!("Expected exactly one key for {line:?}, got {other:?}"),
    }
}

pub fn kinds(table: &ParsedTableDefinition) -> Vec<KeyKind> {
    table.keys.iter().map(|k| k.kind).collect()
}
