//! Rendering of reflected definitions back to `CREATE TABLE` text.
//!
//! The output follows the layout of `SHOW CREATE TABLE`, so rendering a
//! [`ParsedTableDefinition`] and parsing it again with the same quoting
//! yields an equivalent definition.

use std::collections::BTreeMap;

use crate::dialect::Dialect;
use crate::error::Result;
use crate::quoting::IdentifierQuoting;
use crate::schema::{
    CheckConstraintSpec, ColumnGroupSpec, ColumnSpec, ForeignKeySpec, KeyColumn, KeyKind,
    KeySpec, ParsedTableDefinition, SortDirection,
};

/// Option names whose SQL spelling contains a space.
const SPACED_OPTIONS: &[&str] = &[
    "default_charset",
    "default_character_set",
    "character_set",
    "default_collate",
];

/// Renders DDL fragments with one identifier quoting configuration.
#[derive(Debug, Clone, Default)]
pub struct DdlRenderer {
    quoting: IdentifierQuoting,
}

impl DdlRenderer {
    /// Creates a renderer for `quoting`.
    #[must_use]
    pub const fn new(quoting: IdentifierQuoting) -> Self {
        Self { quoting }
    }

    /// Creates a renderer quoting identifiers the way `dialect` does.
    ///
    /// # Errors
    ///
    /// Returns an error if the dialect's quoting configuration is invalid.
    pub fn for_dialect(dialect: &impl Dialect) -> Result<Self> {
        Ok(Self::new(dialect.quoting()?))
    }

    /// Renders a parenthesized key column list.
    #[must_use]
    pub fn key_columns(&self, columns: &[KeyColumn]) -> String {
        let rendered: Vec<String> = columns
            .iter()
            .map(|column| {
                let mut sql = self.quoting.quote(&column.name);
                if let Some(length) = column.length {
                    sql.push_str(&format!("({length})"));
                }
                if column.direction == SortDirection::Desc {
                    sql.push_str(" DESC");
                }
                sql
            })
            .collect();
        format!("({})", rendered.join(","))
    }

    /// Renders one key line, without indentation or trailing comma.
    ///
    /// A shard key without columns renders as `SHARD KEY ()`; a key over
    /// `ALL COLUMNS` keeps that spelling.
    #[must_use]
    pub fn key(&self, key: &KeySpec) -> String {
        let mut sql = String::from(key.kind.keyword());
        if key.kind != KeyKind::Primary {
            if let Some(name) = &key.name {
                sql.push(' ');
                sql.push_str(&self.quoting.quote(name));
            }
        }
        sql.push(' ');
        if key.all_columns {
            sql.push_str("ALL COLUMNS");
        } else {
            sql.push_str(&self.key_columns(&key.columns));
        }

        if let Some(options) = &key.index_options {
            sql.push_str(&format!(" INDEX_OPTIONS='{}'", options.replace('\'', "''")));
        }
        if !key.kind.is_storage_key() && key.kind != KeyKind::Vector {
            if let Some(method) = &key.using_index_method {
                sql.push_str(" USING ");
                sql.push_str(method);
            }
            if let Some(size) = &key.key_block_size {
                sql.push_str(" KEY_BLOCK_SIZE=");
                sql.push_str(size);
            }
            if let Some(parser) = &key.parser {
                sql.push_str(" WITH PARSER ");
                sql.push_str(parser);
            }
        }
        if let Some(comment) = &key.comment {
            sql.push_str(" COMMENT ");
            sql.push_str(&quote_string(comment));
        }
        if key.metadata_only {
            sql.push_str(" METADATA_ONLY");
        }
        if let Some(version_sql) = &key.version_sql {
            sql.push_str(&format!(" /*{version_sql} */"));
        }
        sql
    }

    /// Renders one column definition.
    #[must_use]
    pub fn column(&self, column: &ColumnSpec) -> String {
        let mut sql = self.quoting.quote(&column.name);

        if let Some(expression) = &column.persisted_expression {
            sql.push_str(&format!(" AS {expression} PERSISTED {}", column_type(column)));
            if !column.nullable {
                sql.push_str(" NOT NULL");
            }
            return sql;
        }

        sql.push(' ');
        sql.push_str(&column_type(column));
        if column.unsigned {
            sql.push_str(" UNSIGNED");
        }
        if column.zerofill {
            sql.push_str(" ZEROFILL");
        }
        if let Some(charset) = &column.charset {
            sql.push_str(" CHARACTER SET ");
            sql.push_str(charset);
        }
        if let Some(collate) = &column.collate {
            sql.push_str(" COLLATE ");
            sql.push_str(collate);
        }
        if !column.nullable {
            sql.push_str(" NOT NULL");
        }
        if let Some(default) = &column.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(default);
        }
        if let Some(generated) = &column.generated {
            sql.push_str(" GENERATED ALWAYS AS ");
            sql.push_str(&generated.sqltext);
            match generated.persisted {
                Some(true) => sql.push_str(" STORED"),
                Some(false) => sql.push_str(" VIRTUAL"),
                None => {}
            }
        }
        if column.autoincrement {
            sql.push_str(" AUTO_INCREMENT");
        }
        if let Some(comment) = &column.comment {
            sql.push_str(" COMMENT ");
            sql.push_str(&quote_string(comment));
        }
        if let Some(format) = &column.column_format {
            sql.push_str(" COLUMN_FORMAT ");
            sql.push_str(format);
        }
        if let Some(storage) = &column.storage {
            sql.push_str(" STORAGE ");
            sql.push_str(storage);
        }
        if let Some(extra) = &column.extra {
            sql.push(' ');
            sql.push_str(extra);
        }
        sql
    }

    /// Renders a foreign key constraint.
    #[must_use]
    pub fn foreign_key(&self, fk: &ForeignKeySpec) -> String {
        let names = |names: &[String]| {
            names
                .iter()
                .map(|n| self.quoting.quote(n))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let mut table = self.quoting.quote(&fk.referred_table);
        if let Some(schema) = &fk.referred_schema {
            table = format!("{}.{table}", self.quoting.quote(schema));
        }
        let mut sql = format!(
            "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {table} ({})",
            self.quoting.quote(&fk.name),
            names(&fk.local_columns),
            names(&fk.referred_columns),
        );
        if let Some(match_type) = &fk.match_type {
            sql.push_str(" MATCH ");
            sql.push_str(match_type);
        }
        if let Some(action) = fk.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.as_str());
        }
        if let Some(action) = fk.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action.as_str());
        }
        sql
    }

    /// Renders a check constraint.
    #[must_use]
    pub fn check(&self, check: &CheckConstraintSpec) -> String {
        format!(
            "CONSTRAINT {} CHECK ({})",
            self.quoting.quote(&check.name),
            check.sqltext
        )
    }

    /// Renders a column group.
    #[must_use]
    pub fn column_group(&self, group: &ColumnGroupSpec) -> String {
        match &group.name {
            Some(name) => format!("COLUMN GROUP {} (*)", self.quoting.quote(name)),
            None => String::from("COLUMN GROUP (*)"),
        }
    }

    /// Renders table options as space separated `NAME=value` pairs.
    #[must_use]
    pub fn table_options(&self, options: &BTreeMap<String, String>) -> String {
        options
            .iter()
            .map(|(name, value)| {
                let mut key = name.to_ascii_uppercase();
                if SPACED_OPTIONS.contains(&name.as_str()) {
                    key = key.replace('_', " ");
                }
                let value = if name == "comment" {
                    quote_string(value)
                } else if value.is_empty() || value.contains(|c: char| c.is_whitespace() || c == '\'') {
                    format!("'{}'", value.replace('\'', "''"))
                } else {
                    value.clone()
                };
                format!("{key}={value}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Renders a whole definition in `SHOW CREATE TABLE` layout.
    #[must_use]
    pub fn create_table(&self, table: &ParsedTableDefinition) -> String {
        let mut sql = String::from("CREATE ");
        for modifier in table.table_type.modifiers() {
            sql.push_str(modifier);
            sql.push(' ');
        }
        sql.push_str("TABLE ");
        sql.push_str(&self.quoting.quote(table.table_name.as_deref().unwrap_or_default()));
        sql.push_str(" (\n");

        let body: Vec<String> = table
            .columns
            .iter()
            .map(|c| self.column(c))
            .chain(table.keys.iter().map(|k| self.key(k)))
            .chain(table.fk_constraints.iter().map(|fk| self.foreign_key(fk)))
            .chain(table.ck_constraints.iter().map(|ck| self.check(ck)))
            .chain(table.column_groups.iter().map(|g| self.column_group(g)))
            .map(|line| format!("  {line}"))
            .collect();
        sql.push_str(&body.join(",\n"));

        sql.push_str("\n)");
        if !table.table_options.is_empty() {
            sql.push(' ');
            sql.push_str(&self.table_options(&table.table_options));
        }
        sql
    }
}

fn column_type(column: &ColumnSpec) -> String {
    if column.data_type.is_known() {
        return column.data_type.to_sql();
    }
    if column.type_args.is_empty() {
        column.type_name.clone()
    } else {
        format!("{}({})", column.type_name, column.type_args.join(","))
    }
}

/// Quotes a string literal, escaping backslashes and control characters.
fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}
