//! The ordered pattern table used to classify key and constraint lines.
//!
//! The MySQL-family table recognizes ordinary keys, foreign keys and check
//! constraints. The SingleStore table is the same table with the shard,
//! sort, vector and column-group entries spliced in ahead of the generic
//! key entry, so one first-match loop serves both.

use regex::{Captures, Regex};

use crate::error::{Error, Result};
use crate::quoting::IdentifierQuoting;

/// What a matched key/constraint line is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Table options printed on their own line inside the body.
    TableOption,
    /// `COLUMN GROUP`.
    ColumnGroup,
    /// `SHARD KEY`.
    ShardKey,
    /// `SORT KEY`.
    SortKey,
    /// `VECTOR INDEX`.
    VectorIndex,
    /// `[PRIMARY|UNIQUE|FULLTEXT|SPATIAL] KEY`.
    Key,
    /// `CONSTRAINT ... FOREIGN KEY`.
    ForeignKey,
    /// `CONSTRAINT ... CHECK`.
    Check,
}

/// One compiled entry of a [`PatternTable`].
#[derive(Debug, Clone)]
pub struct Pattern {
    kind: LineKind,
    regex: Regex,
}

impl Pattern {
    /// Compiles `source` as the pattern for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] if `source` is not a valid regex.
    pub fn new(kind: LineKind, name: &'static str, source: &str) -> Result<Self> {
        let regex = Regex::new(source).map_err(|source| Error::Pattern { name, source })?;
        Ok(Self { kind, regex })
    }

    /// Returns the line kind this pattern recognizes.
    #[must_use]
    pub const fn kind(&self) -> LineKind {
        self.kind
    }

    /// Returns the compiled regex.
    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// An ordered list of patterns; the first match wins.
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    patterns: Vec<Pattern>,
}

impl PatternTable {
    /// The generic MySQL-family table: keys, foreign keys, checks.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile.
    pub fn mysql(quoting: &IdentifierQuoting) -> Result<Self> {
        Ok(Self {
            patterns: vec![
                Pattern::new(LineKind::Key, "key", &key_source(quoting))?,
                Pattern::new(
                    LineKind::ForeignKey,
                    "foreign key",
                    &foreign_key_source(quoting),
                )?,
                Pattern::new(LineKind::Check, "check", &check_source(quoting))?,
            ],
        })
    }

    /// The SingleStore table: the MySQL table plus shard, sort, vector,
    /// column group and inline table option entries ahead of `Key`.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile.
    pub fn singlestore(quoting: &IdentifierQuoting) -> Result<Self> {
        let mut table = Self::mysql(quoting)?;
        let extensions = [
            Pattern::new(LineKind::TableOption, "table option", TABLE_OPTION_SOURCE)?,
            Pattern::new(
                LineKind::ColumnGroup,
                "column group",
                &column_group_source(quoting),
            )?,
            Pattern::new(
                LineKind::ShardKey,
                "shard key",
                &storage_key_source(quoting, "SHARD", true),
            )?,
            Pattern::new(
                LineKind::SortKey,
                "sort key",
                &storage_key_source(quoting, "SORT", false),
            )?,
            Pattern::new(LineKind::VectorIndex, "vector index", &vector_source(quoting))?,
        ];
        for pattern in extensions {
            table.insert_before(LineKind::Key, pattern);
        }
        Ok(table)
    }

    /// Inserts `pattern` immediately before the first entry of kind
    /// `anchor`, or appends it when there is no such entry.
    pub fn insert_before(&mut self, anchor: LineKind, pattern: Pattern) {
        match self.patterns.iter().position(|p| p.kind == anchor) {
            Some(index) => self.patterns.insert(index, pattern),
            None => self.patterns.push(pattern),
        }
    }

    /// Appends `pattern` at the lowest priority.
    pub fn push(&mut self, pattern: Pattern) {
        self.patterns.push(pattern);
    }

    /// Returns the kinds in priority order.
    #[must_use]
    pub fn kinds(&self) -> Vec<LineKind> {
        self.patterns.iter().map(Pattern::kind).collect()
    }

    /// Finds the first pattern matching `line`.
    #[must_use]
    pub fn find<'t>(&self, line: &'t str) -> Option<(LineKind, Captures<'t>)> {
        self.patterns
            .iter()
            .find_map(|p| p.regex.captures(line).map(|caps| (p.kind, caps)))
    }
}

const LEAD: &str = r"(?i)^\s*(?:,\s*)?";
const TAIL: &str = r"\s*,?\s*$";
const SQL_STRING: &str = r"(?:''|[^'])*";
const TABLE_OPTION_SOURCE: &str = r"(?i)^\s*(?:,\s*)?(?:COMPRESSION|AUTOSTATS_\w+)\s*=";

/// Optional or required `name` alternation: quoted or bare word.
fn name_source(quoting: &IdentifierQuoting) -> String {
    format!(
        r"(?:{}|(?P<name_unquoted>\w+))",
        quoting.quoted_capture("name_quoted")
    )
}

fn key_source(quoting: &IdentifierQuoting) -> String {
    format!(
        concat!(
            "{lead}",
            r"(?:(?P<type>PRIMARY|UNIQUE|FULLTEXT|SPATIAL)(?:\s+USING\s+VERSION\s+\d+)?\s+)?",
            r"(?:KEY|INDEX)",
            r"(?:\s+{name})?",
            r"(?:\s+USING\s+(?P<using_pre>\w+))?",
            r"(?:\s*\((?P<columns>.*?)\)|\s+(?P<all_columns>ALL\s+COLUMNS))",
            r"(?:\s+INDEX_OPTIONS\s*=?\s*'(?P<index_options>{string})')?",
            r"(?:\s+USING\s+(?P<using_post>CLUSTERED\s+COLUMNSTORE|\w+))?",
            r"(?:\s+KEY_BLOCK_SIZE\s*=?\s*(?P<keyblock>\w+))?",
            r"(?:\s+WITH\s+PARSER\s+(?P<parser>\S+?))?",
            r"(?:\s+COMMENT\s+'(?P<comment>{string})')?",
            r"(?:\s+(?P<metadata_only>METADATA_ONLY))?",
            r"(?:\s*/\*(?P<version_sql>.+?)\*/)?",
            "{tail}",
        ),
        lead = LEAD,
        name = name_source(quoting),
        string = SQL_STRING,
        tail = TAIL,
    )
}

fn storage_key_source(quoting: &IdentifierQuoting, keyword: &str, allow_only: bool) -> String {
    let only = if allow_only {
        r"(?:\s+(?P<only>ONLY)\b)?"
    } else {
        ""
    };
    format!(
        concat!(
            "{lead}",
            r"(?P<type>{keyword})\s+KEY",
            "{only}",
            r"(?:\s+{name})?",
            r"\s*\((?P<columns>.*?)\)",
            r"(?:\s+(?P<metadata_only>METADATA_ONLY))?",
            "{tail}",
        ),
        lead = LEAD,
        keyword = keyword,
        only = only,
        name = name_source(quoting),
        tail = TAIL,
    )
}

fn vector_source(quoting: &IdentifierQuoting) -> String {
    format!(
        concat!(
            "{lead}",
            r"VECTOR\s+(?:INDEX|KEY)\s+{name}",
            r"\s*\((?P<columns>.*?)\)",
            r"(?:\s+INDEX_OPTIONS\s*=?\s*'(?P<index_options>{string})')?",
            r"(?:\s+COMMENT\s+'(?P<comment>{string})')?",
            "{tail}",
        ),
        lead = LEAD,
        name = name_source(quoting),
        string = SQL_STRING,
        tail = TAIL,
    )
}

fn column_group_source(quoting: &IdentifierQuoting) -> String {
    format!(
        r"{lead}COLUMN\s+GROUP(?:\s+{name})?\s*\(\s*\*\s*\){tail}",
        lead = LEAD,
        name = name_source(quoting),
        tail = TAIL,
    )
}

fn foreign_key_source(quoting: &IdentifierQuoting) -> String {
    let part = format!(r"(?:{}|\w+)", quoting.quoted_pattern());
    let action = r"RESTRICT|CASCADE|SET\s+NULL|SET\s+DEFAULT|NO\s+ACTION";
    format!(
        concat!(
            r"(?i)^\s*CONSTRAINT\s+{name}\s+FOREIGN\s+KEY\s*\((?P<local>.+?)\)",
            r"\s+REFERENCES\s+(?P<table>{part}(?:\.{part})?)\s*\((?P<foreign>.+?)\)",
            r"(?:\s+MATCH\s+(?P<match>\w+))?",
            r"(?:\s+ON\s+DELETE\s+(?P<ondelete>{action}))?",
            r"(?:\s+ON\s+UPDATE\s+(?P<onupdate>{action}))?",
            "{tail}",
        ),
        name = name_source(quoting),
        part = part,
        action = action,
        tail = TAIL,
    )
}

fn check_source(quoting: &IdentifierQuoting) -> String {
    format!(
        r"(?i)^\s*CONSTRAINT\s+{name}\s+CHECK\s*\((?P<sqltext>.+)\){tail}",
        name = name_source(quoting),
        tail = TAIL,
    )
}
