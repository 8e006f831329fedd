//! The line-oriented `SHOW CREATE TABLE` parser.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::columns::ColumnParser;
use super::constraints::{parse_constraint, Constraint};
use super::diagnostics::{Diagnostic, DiagnosticKind};
use super::options::TableOptionsParser;
use super::patterns::PatternTable;
use super::text::normalize_words;
use crate::error::{Error, Result};
use crate::quoting::IdentifierQuoting;
use crate::schema::{ParsedTableDefinition, TableType};

/// What a raw line of `SHOW CREATE TABLE` output is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineClass {
    /// Two spaces and an opening identifier quote.
    Column,
    /// `) ` followed by table options.
    TableOptions,
    /// A lone `)`.
    Close,
    /// `CREATE ... TABLE name (`.
    Header,
    /// An empty line.
    Empty,
    /// Anything else: a key or constraint candidate.
    Constraint,
}

/// Classifies one raw line. Precedence follows the variant order of
/// [`LineClass`].
#[must_use]
pub fn classify_line(line: &str, quoting: &IdentifierQuoting) -> LineClass {
    if line
        .strip_prefix("  ")
        .is_some_and(|rest| rest.starts_with(quoting.initial_quote()))
    {
        LineClass::Column
    } else if line.starts_with(") ") {
        LineClass::TableOptions
    } else if line == ")" {
        LineClass::Close
    } else if line.starts_with("CREATE ") {
        LineClass::Header
    } else if line.is_empty() {
        LineClass::Empty
    } else {
        LineClass::Constraint
    }
}

/// The outcome of one parse: the table and everything that was skipped
/// or only partially understood along the way.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reflection {
    /// The recovered definition.
    pub table: ParsedTableDefinition,
    /// Findings in line order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Reflection {
    /// Returns `true` if nothing was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns the diagnostics of one kind.
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }
}

/// Parses `SHOW CREATE TABLE` text into a [`ParsedTableDefinition`].
///
/// All patterns are compiled at construction; a parser is immutable
/// afterwards and can be shared between threads.
///
/// ```
/// use singlestore_ddl::quoting::IdentifierQuoting;
/// use singlestore_ddl::reflection::TableDefinitionParser;
///
/// let parser = TableDefinitionParser::new(IdentifierQuoting::backtick()).unwrap();
/// let reflection = parser.parse(
///     "CREATE TABLE `t` (\n  `id` int(11) NOT NULL,\n  SHARD KEY (`id`)\n)",
///     "utf8mb4",
/// );
/// assert_eq!(reflection.table.table_name.as_deref(), Some("t"));
/// assert_eq!(reflection.table.shard_key().unwrap().column_names(), vec!["id"]);
/// ```
#[derive(Debug, Clone)]
pub struct TableDefinitionParser {
    quoting: IdentifierQuoting,
    patterns: PatternTable,
    columns: ColumnParser,
    options: TableOptionsParser,
    header: Regex,
}

impl TableDefinitionParser {
    /// Creates a parser with the SingleStore pattern table.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile.
    pub fn new(quoting: IdentifierQuoting) -> Result<Self> {
        let patterns = PatternTable::singlestore(&quoting)?;
        Self::with_patterns(quoting, patterns)
    }

    /// Creates a parser using a caller-built pattern table.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile.
    pub fn with_patterns(quoting: IdentifierQuoting, patterns: PatternTable) -> Result<Self> {
        let header = format!(
            r"(?i)^CREATE\s+(?P<modifiers>(?:\w+\s+)*?)TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?(?:{}|(?P<bare>\w+))",
            quoting.quoted_capture("name"),
        );
        let header = Regex::new(&header).map_err(|source| Error::Pattern {
            name: "table header",
            source,
        })?;
        Ok(Self {
            columns: ColumnParser::new(&quoting)?,
            options: TableOptionsParser::new()?,
            quoting,
            patterns,
            header,
        })
    }

    /// Returns the identifier quoting this parser was built for.
    #[must_use]
    pub const fn quoting(&self) -> &IdentifierQuoting {
        &self.quoting
    }

    /// Returns the key/constraint pattern table.
    #[must_use]
    pub const fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Parses one `SHOW CREATE TABLE` text.
    ///
    /// `charset` is stored on the result as given. Lines that cannot be
    /// understood are skipped and reported in
    /// [`Reflection::diagnostics`]; parsing itself never fails.
    #[must_use]
    pub fn parse(&self, show_create: &str, charset: &str) -> Reflection {
        let mut reflection = Reflection {
            table: ParsedTableDefinition::new(charset),
            diagnostics: Vec::new(),
        };

        for (index, line) in show_create.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let line_number = index + 1;
            let class = classify_line(line, &self.quoting);
            tracing::debug!(line_number, ?class, "classified line");

            match class {
                LineClass::Column => self.parse_column(line, line_number, &mut reflection),
                LineClass::TableOptions => {
                    self.options.parse_into(&line[2..], &mut reflection.table.table_options);
                }
                LineClass::Header => self.parse_header(line, &mut reflection.table),
                LineClass::Close | LineClass::Empty => {}
                LineClass::Constraint => {
                    self.parse_constraint_line(line, line_number, &mut reflection);
                }
            }
        }

        reflection
    }

    fn parse_column(&self, line: &str, line_number: usize, reflection: &mut Reflection) {
        let Some(column) = self.columns.parse(line) else {
            report(
                reflection,
                Diagnostic::new(DiagnosticKind::UnknownColumnDefinition, line_number, line),
            );
            return;
        };
        if !column.full {
            report(
                reflection,
                Diagnostic::new(DiagnosticKind::IncompleteColumnDefinition, line_number, line),
            );
        }
        if !column.data_type.is_known() {
            let message = format!(
                "Did not recognize type '{}' of column '{}'",
                column.type_name, column.name
            );
            report(
                reflection,
                Diagnostic::new(DiagnosticKind::UnrecognizedColumnType, line_number, line)
                    .with_message(message),
            );
        }
        reflection.table.columns.push(column);
    }

    fn parse_header(&self, line: &str, table: &mut ParsedTableDefinition) {
        let Some(caps) = self.header.captures(line) else {
            tracing::debug!(line, "header without a recognizable table name");
            return;
        };
        table.table_name = caps
            .name("name")
            .map(|m| self.quoting.unescape_identifier(m.as_str()))
            .or_else(|| caps.name("bare").map(|m| m.as_str().to_string()));

        let modifiers = caps
            .name("modifiers")
            .map(|m| normalize_words(m.as_str()))
            .unwrap_or_default();
        let words: Vec<&str> = modifiers.split(' ').collect();
        let global = words.contains(&"GLOBAL");
        table.table_type = TableType {
            rowstore: words.contains(&"ROWSTORE"),
            temporary: words.contains(&"TEMPORARY") && !global,
            global_temporary: global && words.contains(&"TEMPORARY"),
            reference: words.contains(&"REFERENCE"),
        };
    }

    fn parse_constraint_line(&self, line: &str, line_number: usize, reflection: &mut Reflection) {
        let table = &mut reflection.table;
        match parse_constraint(&self.patterns, &self.quoting, line) {
            Some(Constraint::Key(key)) => table.keys.push(key),
            Some(Constraint::ForeignKey(fk)) => table.fk_constraints.push(fk),
            Some(Constraint::Check(check)) => table.ck_constraints.push(check),
            Some(Constraint::ColumnGroup(group)) => table.column_groups.push(group),
            Some(Constraint::TableOptions(text)) => {
                self.options.parse_into(&text, &mut table.table_options);
            }
            None => report(
                reflection,
                Diagnostic::new(DiagnosticKind::UnknownSchemaContent, line_number, line),
            ),
        }
    }
}

fn report(reflection: &mut Reflection, diagnostic: Diagnostic) {
    tracing::warn!(
        kind = ?diagnostic.kind,
        line_number = diagnostic.line_number,
        "{}",
        diagnostic.message
    );
    reflection.diagnostics.push(diagnostic);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::KeyKind;

    fn parser() -> TableDefinitionParser {
        TableDefinitionParser::new(IdentifierQuoting::backtick()).unwrap()
    }

    #[test]
    fn test_classify_line_precedence() {
        let q = IdentifierQuoting::backtick();
        assert_eq!(classify_line("  `id` int", &q), LineClass::Column);
        assert_eq!(classify_line(") ENGINE=x", &q), LineClass::TableOptions);
        assert_eq!(classify_line(")", &q), LineClass::Close);
        assert_eq!(classify_line("CREATE TABLE `t` (", &q), LineClass::Header);
        assert_eq!(classify_line("", &q), LineClass::Empty);
        assert_eq!(classify_line("  KEY (`id`)", &q), LineClass::Constraint);
        assert_eq!(classify_line("  \"id\" int", &q), LineClass::Constraint);
    }

    #[test]
    fn test_classify_line_ansi() {
        let q = IdentifierQuoting::ansi();
        assert_eq!(classify_line("  \"id\" int", &q), LineClass::Column);
        assert_eq!(classify_line("  `id` int", &q), LineClass::Constraint);
    }

    #[test]
    fn test_header_table_types() {
        let parser = parser();
        let cases = [
            ("CREATE TABLE `t` (", TableType::default()),
            (
                "CREATE ROWSTORE TABLE `t` (",
                TableType {
                    rowstore: true,
                    ..TableType::default()
                },
            ),
            (
                "CREATE ROWSTORE REFERENCE TABLE `t` (",
                TableType {
                    rowstore: true,
                    reference: true,
                    ..TableType::default()
                },
            ),
            (
                "CREATE TEMPORARY TABLE `t` (",
                TableType {
                    temporary: true,
                    ..TableType::default()
                },
            ),
            (
                "CREATE ROWSTORE GLOBAL TEMPORARY TABLE `t` (",
                TableType {
                    rowstore: true,
                    global_temporary: true,
                    ..TableType::default()
                },
            ),
        ];
        for (header, expected) in cases {
            let reflection = parser.parse(header, "utf8");
            assert_eq!(reflection.table.table_name.as_deref(), Some("t"), "{header}");
            assert_eq!(reflection.table.table_type, expected, "{header}");
        }
    }

    #[test]
    fn test_header_escaped_name() {
        let reflection = parser().parse("CREATE TABLE `we``ird-name` (", "utf8");
        assert_eq!(reflection.table.table_name.as_deref(), Some("we`ird-name"));
    }

    #[test]
    fn test_crlf_lines() {
        let text = "CREATE TABLE `t` (\r\n  `id` int(11) NOT NULL,\r\n  SORT KEY ()\r\n) COMPRESSION=SPARSE\r\n";
        let reflection = parser().parse(text, "utf8");
        assert!(reflection.is_clean(), "{:?}", reflection.diagnostics);
        assert_eq!(reflection.table.columns.len(), 1);
        assert_eq!(reflection.table.sort_key().unwrap().kind, KeyKind::Sort);
        assert_eq!(reflection.table.table_option("compression"), Some("SPARSE"));
    }

    #[test]
    fn test_unknown_line_reported_with_number() {
        let text = "CREATE TABLE `t` (\n  `id` int(11) NOT NULL,\n  FROBNICATE (`id`)\n)";
        let reflection = parser().parse(text, "utf8");
        assert_eq!(reflection.diagnostics.len(), 1);
        let diag = &reflection.diagnostics[0];
        assert_eq!(diag.kind, DiagnosticKind::UnknownSchemaContent);
        assert_eq!(diag.line_number, 3);
        assert_eq!(diag.line, "  FROBNICATE (`id`)");
    }

    #[test]
    fn test_unrecognized_type_is_kept() {
        let reflection = parser().parse("  `g` hyperloglog NOT NULL,", "utf8");
        assert_eq!(reflection.table.columns.len(), 1);
        assert_eq!(
            reflection
                .diagnostics_of(DiagnosticKind::UnrecognizedColumnType)
                .count(),
            1
        );
    }

    #[test]
    fn test_mysql_patterns_report_shard_key() {
        let q = IdentifierQuoting::backtick();
        let parser =
            TableDefinitionParser::with_patterns(q.clone(), PatternTable::mysql(&q).unwrap())
                .unwrap();
        let reflection = parser.parse("  SHARD KEY (`id`)", "utf8");
        assert!(reflection.table.keys.is_empty());
        assert_eq!(reflection.diagnostics.len(), 1);
    }

    #[test]
    fn test_parser_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TableDefinitionParser>();
    }
}
