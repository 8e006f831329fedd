//! Column-definition lines: `` `name` type [modifiers...] ``.

use regex::Regex;

use super::text::{undouble_quotes, unescape_sql_string};
use crate::error::{Error, Result};
use crate::quoting::IdentifierQuoting;
use crate::schema::{ColumnSpec, GeneratedColumn};
use crate::types::DataType;

/// Parses column lines with a full pattern, a SingleStore persisted
/// column pattern and a loose fallback.
#[derive(Debug, Clone)]
pub struct ColumnParser {
    quoting: IdentifierQuoting,
    full: Regex,
    persisted: Regex,
    loose: Regex,
    quoted_value: Regex,
    not_null: Regex,
}

impl ColumnParser {
    /// Compiles the column patterns for `quoting`.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile.
    pub fn new(quoting: &IdentifierQuoting) -> Result<Self> {
        let name = quoting.quoted_capture("name");
        let compile = |name: &'static str, source: &str| {
            Regex::new(source).map_err(|source| Error::Pattern { name, source })
        };

        let full = format!(
            concat!(
                r"(?i)^  {name} +(?P<coltype>\w+)",
                r"(?:\((?P<arg>(?:\d+|\d+,\s*(?:F|I)?\d+|(?:'(?:''|[^'])*',?)+))\))?",
                r"(?: +(?P<unsigned>UNSIGNED))?",
                r"(?: +(?P<zerofill>ZEROFILL))?",
                r"(?: +CHARACTER SET +(?P<charset>\w+))?",
                r"(?: +COLLATE +(?P<collate>\w+))?",
                r"(?: +(?P<notnull>(?:NOT )?NULL))?",
                r"(?: +DEFAULT +(?P<default>(?:NULL|'(?:''|[^'])*'|[\-\w\.\(\)]+(?: +ON UPDATE [\-\w\.\(\)]+)?)))?",
                r"(?: +(?:GENERATED ALWAYS)? ?AS +(?P<generated>\(.*\))? ?(?P<persistence>VIRTUAL|STORED)?)?",
                r"(?: +(?P<autoincr>AUTO_INCREMENT))?",
                r"(?: +COMMENT +'(?P<comment>(?:''|[^'])*)')?",
                r"(?: +COLUMN_FORMAT +(?P<colfmt>\w+))?",
                r"(?: +STORAGE +(?P<storage>\w+))?",
                r"(?: +(?P<extra>.*?))?",
                r",?$",
            ),
            name = name,
        );
        let persisted = format!(
            concat!(
                r"(?i)^  {name} +AS +(?P<expression>.+?) +PERSISTED +(?P<coltype>\w+)",
                r"(?:\((?P<arg>[^)]*)\))?",
                r"(?P<rest>.*?),?$",
            ),
            name = name,
        );
        let loose = format!(
            r"(?i)^  {name} +(?P<coltype>\w+)(?:\((?P<arg>(?:\d+|\d+,\d+|'(?:''|[^'])+'))\))?",
            name = name,
        );

        Ok(Self {
            quoting: quoting.clone(),
            full: compile("column", &full)?,
            persisted: compile("persisted column", &persisted)?,
            loose: compile("loose column", &loose)?,
            quoted_value: compile("quoted value", r"'((?:''|[^'])*)'")?,
            not_null: compile("not null", r"(?i)\bNOT\s+NULL\b")?,
        })
    }

    /// Parses one column line.
    ///
    /// Returns `None` when no pattern matches. A column recovered only by
    /// the loose pattern has [`ColumnSpec::full`] set to `false`.
    #[must_use]
    pub fn parse(&self, line: &str) -> Option<ColumnSpec> {
        if let Some(caps) = self.persisted.captures(line) {
            let mut column = self.base_column(&caps["name"], &caps["coltype"], caps.name("arg").map(|m| m.as_str()));
            column.persisted_expression = Some(caps["expression"].trim().to_string());
            column.nullable = !self.not_null.is_match(&caps["rest"]);
            return Some(column);
        }

        if let Some(caps) = self.full.captures(line) {
            let mut column = self.base_column(&caps["name"], &caps["coltype"], caps.name("arg").map(|m| m.as_str()));
            let text = |group: &str| caps.name(group).map(|m| m.as_str().to_string());

            column.unsigned = caps.name("unsigned").is_some();
            column.zerofill = caps.name("zerofill").is_some();
            column.charset = text("charset");
            column.collate = text("collate");
            column.nullable = !caps
                .name("notnull")
                .is_some_and(|m| m.as_str().eq_ignore_ascii_case("NOT NULL"));
            column.default = text("default").filter(|d| !d.eq_ignore_ascii_case("NULL"));
            column.autoincrement = caps.name("autoincr").is_some();
            column.comment = caps.name("comment").map(|m| unescape_sql_string(m.as_str()));
            column.generated = caps.name("generated").map(|m| GeneratedColumn {
                sqltext: m.as_str().to_string(),
                persisted: caps
                    .name("persistence")
                    .map(|p| p.as_str().eq_ignore_ascii_case("STORED")),
            });
            column.column_format = text("colfmt");
            column.storage = text("storage");
            column.extra = caps
                .name("extra")
                .map(|m| m.as_str().trim().trim_end_matches(',').trim().to_string())
                .filter(|e| !e.is_empty());
            return Some(column);
        }

        let caps = self.loose.captures(line)?;
        let mut column = self.base_column(&caps["name"], &caps["coltype"], caps.name("arg").map(|m| m.as_str()));
        column.nullable = !self.not_null.is_match(line);
        column.full = false;
        Some(column)
    }

    fn base_column(&self, raw_name: &str, type_name: &str, args: Option<&str>) -> ColumnSpec {
        let type_args = self.type_args(args);
        let mut column = ColumnSpec::new(self.quoting.unescape_identifier(raw_name), type_name);
        column.data_type = DataType::from_reflected(type_name, &type_args);
        column.type_args = type_args;
        column
    }

    /// Splits positional type arguments: quoted enum/set values are
    /// unquoted, anything else is split on commas.
    fn type_args(&self, args: Option<&str>) -> Vec<String> {
        let Some(args) = args.map(str::trim).filter(|a| !a.is_empty()) else {
            return Vec::new();
        };
        if args.starts_with('\'') && args.ends_with('\'') {
            return self
                .quoted_value
                .captures_iter(args)
                .map(|caps| undouble_quotes(&caps[1]))
                .collect();
        }
        args.split(',').map(|a| a.trim().to_string()).collect()
    }
}
