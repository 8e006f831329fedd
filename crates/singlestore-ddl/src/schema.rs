//! Structured table descriptions recovered by reflection.
//!
//! A [`ParsedTableDefinition`] is built fresh for every `SHOW CREATE TABLE`
//! text, populated by one parse pass and handed to the caller. Keys of
//! every flavour (ordinary, primary, shard, sort, vector, ...) live in a
//! single [`ParsedTableDefinition::keys`] sequence in the order the server
//! printed them, so the definition can be re-emitted faithfully.

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::reflection::text::normalize_words;
use crate::types::DataType;

/// Direction of one column inside a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Ascending (the default when no direction is written).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Parses `ASC` / `DESC`, case-insensitively.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    /// Returns the upper-case SQL keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column reference inside a key definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyColumn {
    /// Unquoted column name.
    pub name: String,
    /// Per-column direction.
    pub direction: SortDirection,
    /// Prefix length, e.g. `` `title`(10) ``.
    pub length: Option<u32>,
}

impl KeyColumn {
    /// Creates an ascending column reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: SortDirection::Asc,
            length: None,
        }
    }

    /// Creates a descending column reference.
    #[must_use]
    pub fn desc(name: impl Into<String>) -> Self {
        Self {
            direction: SortDirection::Desc,
            ..Self::new(name)
        }
    }

    /// Sets the prefix length.
    #[must_use]
    pub const fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }
}

/// What a key line declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    /// Plain `KEY` / `INDEX`.
    Key,
    /// `PRIMARY KEY`.
    Primary,
    /// `UNIQUE KEY`.
    Unique,
    /// `FULLTEXT KEY`.
    Fulltext,
    /// `SPATIAL KEY`.
    Spatial,
    /// `SHARD KEY`: row distribution across partitions.
    Shard,
    /// `SORT KEY`: on-disk ordering inside a partition.
    Sort,
    /// `VECTOR INDEX`: nearest-neighbour search structure.
    Vector,
    /// `FOREIGN KEY` constraint.
    ForeignKey,
    /// `CHECK` constraint.
    Check,
}

impl KeyKind {
    /// Maps the optional type word in front of `KEY` to a kind.
    #[must_use]
    pub fn from_type_word(word: Option<&str>) -> Option<Self> {
        let Some(word) = word else {
            return Some(Self::Key);
        };
        match word.to_ascii_uppercase().as_str() {
            "PRIMARY" => Some(Self::Primary),
            "UNIQUE" => Some(Self::Unique),
            "FULLTEXT" => Some(Self::Fulltext),
            "SPATIAL" => Some(Self::Spatial),
            "SHARD" => Some(Self::Shard),
            "SORT" => Some(Self::Sort),
            "VECTOR" => Some(Self::Vector),
            _ => None,
        }
    }

    /// Returns the keyword used when emitting the key.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Key => "KEY",
            Self::Primary => "PRIMARY KEY",
            Self::Unique => "UNIQUE KEY",
            Self::Fulltext => "FULLTEXT KEY",
            Self::Spatial => "SPATIAL KEY",
            Self::Shard => "SHARD KEY",
            Self::Sort => "SORT KEY",
            Self::Vector => "VECTOR INDEX",
            Self::ForeignKey => "FOREIGN KEY",
            Self::Check => "CHECK",
        }
    }

    /// Returns `true` for the distribution/ordering pseudo-keys.
    #[must_use]
    pub const fn is_storage_key(self) -> bool {
        matches!(self, Self::Shard | Self::Sort)
    }
}

/// A key or index declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpec {
    /// Key flavour.
    pub kind: KeyKind,
    /// Key name; anonymous keys have none.
    pub name: Option<String>,
    /// Columns in declaration order.
    pub columns: Vec<KeyColumn>,
    /// Declared as `ALL COLUMNS` instead of a column list.
    #[serde(default)]
    pub all_columns: bool,
    /// Index method, e.g. `BTREE`, `HASH`, `CLUSTERED COLUMNSTORE`.
    pub using_index_method: Option<String>,
    /// Opaque option payload, typically JSON for vector indexes.
    pub index_options: Option<String>,
    /// Key comment.
    pub comment: Option<String>,
    /// Declared but no physical index structure is built.
    pub metadata_only: bool,
    /// `KEY_BLOCK_SIZE` value.
    pub key_block_size: Option<String>,
    /// Full-text parser plugin.
    pub parser: Option<String>,
    /// Body of a trailing versioned comment (`/*!50100 ... */`).
    pub version_sql: Option<String>,
}

impl KeySpec {
    /// Creates an anonymous key with no columns.
    #[must_use]
    pub const fn new(kind: KeyKind) -> Self {
        Self {
            kind,
            name: None,
            columns: Vec::new(),
            all_columns: false,
            using_index_method: None,
            index_options: None,
            comment: None,
            metadata_only: false,
            key_block_size: None,
            parser: None,
            version_sql: None,
        }
    }

    /// Sets the key name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Appends a column.
    #[must_use]
    pub fn column(mut self, column: KeyColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Appends ascending columns by name.
    #[must_use]
    pub fn columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(names.into_iter().map(KeyColumn::new));
        self
    }

    /// Covers every column of the table (`ALL COLUMNS`).
    #[must_use]
    pub const fn all_columns(mut self) -> Self {
        self.all_columns = true;
        self
    }

    /// Sets the index method.
    #[must_use]
    pub fn using(mut self, method: impl Into<String>) -> Self {
        self.using_index_method = Some(method.into());
        self
    }

    /// Sets the index options payload.
    #[must_use]
    pub fn index_options(mut self, options: impl Into<String>) -> Self {
        self.index_options = Some(options.into());
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Marks the key as metadata only.
    #[must_use]
    pub const fn metadata_only(mut self) -> Self {
        self.metadata_only = true;
        self
    }

    /// Returns the column names in order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Returns `true` for a shard key with no columns (keyless sharding).
    #[must_use]
    pub fn is_keyless_shard(&self) -> bool {
        self.kind == KeyKind::Shard && self.columns.is_empty()
    }
}

/// Referential action of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferentialAction {
    /// `RESTRICT`
    Restrict,
    /// `CASCADE`
    Cascade,
    /// `SET NULL`
    SetNull,
    /// `SET DEFAULT`
    SetDefault,
    /// `NO ACTION`
    NoAction,
}

impl ReferentialAction {
    /// Parses an action, tolerating any run of whitespace between words.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match normalize_words(text).as_str() {
            "RESTRICT" => Some(Self::Restrict),
            "CASCADE" => Some(Self::Cascade),
            "SET NULL" => Some(Self::SetNull),
            "SET DEFAULT" => Some(Self::SetDefault),
            "NO ACTION" => Some(Self::NoAction),
            _ => None,
        }
    }

    /// Returns the SQL spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// A foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeySpec {
    /// Constraint name.
    pub name: String,
    /// Columns in this table.
    pub local_columns: Vec<String>,
    /// Schema of the referenced table, when qualified.
    pub referred_schema: Option<String>,
    /// Referenced table.
    pub referred_table: String,
    /// Referenced columns.
    pub referred_columns: Vec<String>,
    /// `MATCH` clause, e.g. `MATCH FULL`.
    pub match_type: Option<String>,
    /// `ON DELETE` action.
    pub on_delete: Option<ReferentialAction>,
    /// `ON UPDATE` action.
    pub on_update: Option<ReferentialAction>,
}

/// A check constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConstraintSpec {
    /// Constraint name.
    pub name: String,
    /// Check expression, without the surrounding parentheses.
    pub sqltext: String,
}

/// A `COLUMN GROUP` declaration (row-oriented copy of all columns).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnGroupSpec {
    /// Group name; anonymous groups have none.
    pub name: Option<String>,
}

/// A generated (computed) column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedColumn {
    /// Generation expression.
    pub sqltext: String,
    /// `Some(true)` for `STORED`, `Some(false)` for `VIRTUAL`.
    pub persisted: Option<bool>,
}

/// One reflected column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Unquoted column name.
    pub name: String,
    /// Type name exactly as reflected (e.g. `varchar`).
    pub type_name: String,
    /// Resolved data type.
    pub data_type: DataType,
    /// Positional type arguments, with enum/set values unquoted.
    pub type_args: Vec<String>,
    /// `UNSIGNED` flag.
    pub unsigned: bool,
    /// `ZEROFILL` flag.
    pub zerofill: bool,
    /// Column character set.
    pub charset: Option<String>,
    /// Column collation.
    pub collate: Option<String>,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Default value as written, with `NULL` normalized to `None`.
    pub default: Option<String>,
    /// `AUTO_INCREMENT` flag.
    pub autoincrement: bool,
    /// Column comment.
    pub comment: Option<String>,
    /// `GENERATED ALWAYS AS (...)` definition.
    pub generated: Option<GeneratedColumn>,
    /// SingleStore `AS expr PERSISTED type` expression.
    pub persisted_expression: Option<String>,
    /// `COLUMN_FORMAT` value.
    pub column_format: Option<String>,
    /// `STORAGE` value.
    pub storage: Option<String>,
    /// Unparsed trailing text.
    pub extra: Option<String>,
    /// `false` when only the loose fallback pattern matched.
    pub full: bool,
}

impl ColumnSpec {
    /// Creates a nullable column of the given reflected type.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self {
            name: name.into(),
            data_type: DataType::from_reflected(&type_name, &[]),
            type_name,
            type_args: Vec::new(),
            unsigned: false,
            zerofill: false,
            charset: None,
            collate: None,
            nullable: true,
            default: None,
            autoincrement: false,
            comment: None,
            generated: None,
            persisted_expression: None,
            column_format: None,
            storage: None,
            extra: None,
            full: true,
        }
    }
}

/// Storage flavour declared on the `CREATE ... TABLE` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableType {
    /// `ROWSTORE` (columnstore otherwise).
    pub rowstore: bool,
    /// `TEMPORARY`.
    pub temporary: bool,
    /// `GLOBAL TEMPORARY`.
    pub global_temporary: bool,
    /// `REFERENCE` (replicated to every node).
    pub reference: bool,
}

impl TableType {
    /// Returns `true` unless the table is a rowstore.
    #[must_use]
    pub const fn is_columnstore(&self) -> bool {
        !self.rowstore
    }

    /// Returns the modifier words between `CREATE` and `TABLE`.
    #[must_use]
    pub fn modifiers(&self) -> Vec<&'static str> {
        let mut words = Vec::new();
        if self.rowstore {
            words.push("ROWSTORE");
        }
        if self.reference {
            words.push("REFERENCE");
        }
        if self.global_temporary {
            words.push("GLOBAL TEMPORARY");
        } else if self.temporary {
            words.push("TEMPORARY");
        }
        words
    }
}

/// Everything recovered from one `SHOW CREATE TABLE` text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedTableDefinition {
    /// Table name from the header line.
    pub table_name: Option<String>,
    /// Character set supplied by the caller.
    pub charset: String,
    /// Storage flavour from the header line.
    pub table_type: TableType,
    /// Columns in physical order.
    pub columns: Vec<ColumnSpec>,
    /// All keys, including shard/sort/vector keys, in read order.
    pub keys: Vec<KeySpec>,
    /// Foreign key constraints.
    pub fk_constraints: Vec<ForeignKeySpec>,
    /// Check constraints.
    pub ck_constraints: Vec<CheckConstraintSpec>,
    /// Column groups.
    pub column_groups: Vec<ColumnGroupSpec>,
    /// Table options keyed by lower-case name.
    pub table_options: BTreeMap<String, String>,
}

impl ParsedTableDefinition {
    /// Creates an empty definition carrying the caller's charset.
    #[must_use]
    pub fn new(charset: impl Into<String>) -> Self {
        Self {
            charset: charset.into(),
            ..Self::default()
        }
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the primary key, if any.
    #[must_use]
    pub fn primary_key(&self) -> Option<&KeySpec> {
        self.keys.iter().find(|k| k.kind == KeyKind::Primary)
    }

    /// Returns the shard key, if one was printed.
    ///
    /// `Some` with no columns means keyless sharding; `None` means the
    /// definition carried no shard key line at all.
    #[must_use]
    pub fn shard_key(&self) -> Option<&KeySpec> {
        self.keys.iter().find(|k| k.kind == KeyKind::Shard)
    }

    /// Returns the sort key, if any.
    #[must_use]
    pub fn sort_key(&self) -> Option<&KeySpec> {
        self.keys.iter().find(|k| k.kind == KeyKind::Sort)
    }

    /// Returns the vector indexes in read order.
    pub fn vector_indexes(&self) -> impl Iterator<Item = &KeySpec> {
        self.keys.iter().filter(|k| k.kind == KeyKind::Vector)
    }

    /// Returns the keys that are neither shard nor sort keys.
    pub fn indexes(&self) -> impl Iterator<Item = &KeySpec> {
        self.keys.iter().filter(|k| !k.kind.is_storage_key())
    }

    /// Looks up a table option by lower-case name.
    #[must_use]
    pub fn table_option(&self, name: &str) -> Option<&str> {
        self.table_options.get(name).map(String::as_str)
    }
}
