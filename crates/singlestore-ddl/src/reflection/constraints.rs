//! Extraction of keys and constraints from matched lines.

use regex::Captures;

use super::patterns::{LineKind, PatternTable};
use super::text::{normalize_words, quoted_len, split_quoted, undouble_quotes, unescape_sql_string};
use crate::quoting::IdentifierQuoting;
use crate::schema::{
    CheckConstraintSpec, ColumnGroupSpec, ForeignKeySpec, KeyColumn, KeyKind, KeySpec,
    ReferentialAction, SortDirection,
};

/// A classified key or constraint line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Any key, including shard, sort and vector keys.
    Key(KeySpec),
    /// A foreign key constraint.
    ForeignKey(ForeignKeySpec),
    /// A check constraint.
    Check(CheckConstraintSpec),
    /// A column group.
    ColumnGroup(ColumnGroupSpec),
    /// Table options printed inside the body; holds the line without its
    /// surrounding whitespace and separating comma.
    TableOptions(String),
}

impl Constraint {
    /// Returns the key kind this constraint corresponds to, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<KeyKind> {
        match self {
            Self::Key(spec) => Some(spec.kind),
            Self::ForeignKey(_) => Some(KeyKind::ForeignKey),
            Self::Check(_) => Some(KeyKind::Check),
            Self::ColumnGroup(_) | Self::TableOptions(_) => None,
        }
    }
}

/// Classifies and parses one key/constraint line.
///
/// Returns `None` when no pattern matches, or when the matching pattern's
/// column list cannot be read (for example because of unbalanced quoting).
#[must_use]
pub fn parse_constraint(
    table: &PatternTable,
    quoting: &IdentifierQuoting,
    line: &str,
) -> Option<Constraint> {
    let (kind, caps) = table.find(line)?;
    match kind {
        LineKind::TableOption => Some(Constraint::TableOptions(
            line.trim().trim_end_matches(',').trim_end().to_string(),
        )),
        LineKind::ColumnGroup => Some(Constraint::ColumnGroup(ColumnGroupSpec {
            name: captured_name(&caps, quoting),
        })),
        LineKind::ShardKey | LineKind::SortKey => storage_key(kind, &caps, quoting).map(Constraint::Key),
        LineKind::VectorIndex => vector_key(&caps, quoting).map(Constraint::Key),
        LineKind::Key => generic_key(&caps, quoting).map(Constraint::Key),
        LineKind::ForeignKey => foreign_key(&caps, quoting).map(Constraint::ForeignKey),
        LineKind::Check => Some(Constraint::Check(CheckConstraintSpec {
            name: captured_name(&caps, quoting)?,
            sqltext: caps["sqltext"].trim().to_string(),
        })),
    }
}

/// Parses a key column list such as `` `a`, b DESC, `c`(10) asc ``.
///
/// An empty list is valid and yields no columns. Returns `None` if any
/// entry is malformed or empty (`a,,b`).
#[must_use]
pub fn parse_key_columns(text: &str, quoting: &IdentifierQuoting) -> Option<Vec<KeyColumn>> {
    if text.trim().is_empty() {
        return Some(Vec::new());
    }
    split_quoted(text, ',', quoting)?
        .into_iter()
        .map(str::trim)
        .map(|entry| parse_key_column(entry, quoting))
        .collect()
}

fn parse_key_column(entry: &str, quoting: &IdentifierQuoting) -> Option<KeyColumn> {
    let (name, rest) = split_identifier(entry, quoting)?;
    let mut column = KeyColumn::new(name);

    let mut rest = rest.trim_start();
    if let Some(after_paren) = rest.strip_prefix('(') {
        let close = after_paren.find(')')?;
        column.length = Some(after_paren[..close].trim().parse().ok()?);
        rest = after_paren[close + 1..].trim_start();
    }

    let rest = rest.trim();
    if !rest.is_empty() {
        column.direction = SortDirection::parse(rest)?;
    }
    Some(column)
}

/// Splits the leading identifier off `entry`, returning the unquoted name
/// and the remaining text.
fn split_identifier<'e>(entry: &'e str, quoting: &IdentifierQuoting) -> Option<(String, &'e str)> {
    if entry.starts_with(quoting.initial_quote()) {
        let len = quoted_len(entry, quoting)?;
        let name = quoting.unquote(&entry[..len])?;
        return Some((name, &entry[len..]));
    }
    let end = entry
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(entry.len());
    if end == 0 {
        return None;
    }
    let name = quoting.unquote(&entry[..end])?;
    Some((name, &entry[end..]))
}

fn captured_name(caps: &Captures<'_>, quoting: &IdentifierQuoting) -> Option<String> {
    caps.name("name_quoted")
        .map(|m| quoting.unescape_identifier(m.as_str()))
        .or_else(|| caps.name("name_unquoted").map(|m| m.as_str().to_string()))
}

fn storage_key(kind: LineKind, caps: &Captures<'_>, quoting: &IdentifierQuoting) -> Option<KeySpec> {
    let key_kind = if kind == LineKind::ShardKey {
        KeyKind::Shard
    } else {
        KeyKind::Sort
    };
    let mut spec = KeySpec::new(key_kind);
    spec.name = captured_name(caps, quoting);
    spec.columns = parse_key_columns(&caps["columns"], quoting)?;
    spec.metadata_only = caps.name("only").is_some() || caps.name("metadata_only").is_some();
    Some(spec)
}

fn vector_key(caps: &Captures<'_>, quoting: &IdentifierQuoting) -> Option<KeySpec> {
    let mut spec = KeySpec::new(KeyKind::Vector);
    spec.name = captured_name(caps, quoting);
    spec.columns = parse_key_columns(&caps["columns"], quoting)?;
    spec.index_options = caps.name("index_options").map(|m| undouble_quotes(m.as_str()));
    spec.comment = caps.name("comment").map(|m| unescape_sql_string(m.as_str()));
    Some(spec)
}

fn generic_key(caps: &Captures<'_>, quoting: &IdentifierQuoting) -> Option<KeySpec> {
    let kind = KeyKind::from_type_word(caps.name("type").map(|m| m.as_str()))?;
    let mut spec = KeySpec::new(kind);
    spec.name = captured_name(caps, quoting);
    spec.columns = match caps.name("columns") {
        Some(columns) => parse_key_columns(columns.as_str(), quoting)?,
        None => Vec::new(),
    };
    spec.all_columns = caps.name("all_columns").is_some();
    spec.using_index_method = caps
        .name("using_post")
        .or_else(|| caps.name("using_pre"))
        .map(|m| normalize_words(m.as_str()));
    spec.index_options = caps.name("index_options").map(|m| undouble_quotes(m.as_str()));
    spec.key_block_size = caps.name("keyblock").map(|m| m.as_str().to_string());
    spec.parser = caps.name("parser").map(|m| {
        quoting
            .unquote(m.as_str())
            .unwrap_or_else(|| m.as_str().to_string())
    });
    spec.comment = caps.name("comment").map(|m| unescape_sql_string(m.as_str()));
    spec.metadata_only = caps.name("metadata_only").is_some();
    spec.version_sql = caps.name("version_sql").map(|m| m.as_str().trim().to_string());
    Some(spec)
}

fn foreign_key(caps: &Captures<'_>, quoting: &IdentifierQuoting) -> Option<ForeignKeySpec> {
    let table_parts = names_on(&caps["table"], '.', quoting)?;
    let (referred_schema, referred_table) = match table_parts.as_slice() {
        [table] => (None, table.clone()),
        [schema, table] => (Some(schema.clone()), table.clone()),
        _ => return None,
    };

    Some(ForeignKeySpec {
        name: captured_name(caps, quoting)?,
        local_columns: names_on(&caps["local"], ',', quoting)?,
        referred_schema,
        referred_table,
        referred_columns: names_on(&caps["foreign"], ',', quoting)?,
        match_type: caps.name("match").map(|m| m.as_str().to_ascii_uppercase()),
        on_delete: caps
            .name("ondelete")
            .and_then(|m| ReferentialAction::parse(m.as_str())),
        on_update: caps
            .name("onupdate")
            .and_then(|m| ReferentialAction::parse(m.as_str())),
    })
}

fn names_on(text: &str, separator: char, quoting: &IdentifierQuoting) -> Option<Vec<String>> {
    split_quoted(text, separator, quoting)?
        .into_iter()
        .map(|part| quoting.unquote(part.trim()))
        .collect()
}
