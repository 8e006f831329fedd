//! # singlestore-ddl
//!
//! Reflection of SingleStore table definitions.
//!
//! This crate provides:
//! - A line-oriented parser for `SHOW CREATE TABLE` output that recovers
//!   columns, keys (including shard, sort and vector keys), foreign keys,
//!   check constraints, column groups and table options
//! - Identifier quoting for backtick and `ANSI_QUOTES` modes
//! - Rendering of a reflected definition back to `CREATE TABLE` text
//!
//! ## Parsing
//!
//! Parsing never fails. Lines the parser does not understand are skipped
//! and reported as diagnostics next to the result:
//!
//! ```rust
//! use singlestore_ddl::dialect::{Dialect, SingleStoreDialect};
//! use singlestore_ddl::schema::KeyKind;
//!
//! let parser = SingleStoreDialect::new().table_definition_parser().unwrap();
//! let text = "CREATE TABLE `t` (
//!   `id` int(11) NOT NULL,
//!   `name` varchar(50) DEFAULT NULL,
//!   PRIMARY KEY (`id`),
//!   SHARD KEY (`id`),
//!   FANCY NEW THING (`id`)
//! )";
//!
//! let reflection = parser.parse(text, "utf8mb4");
//! let kinds: Vec<KeyKind> = reflection.table.keys.iter().map(|k| k.kind).collect();
//! assert_eq!(kinds, vec![KeyKind::Primary, KeyKind::Shard]);
//! assert_eq!(reflection.diagnostics.len(), 1);
//! ```
//!
//! ## Rendering
//!
//! ```rust
//! use singlestore_ddl::ddl::DdlRenderer;
//! use singlestore_ddl::schema::{KeyColumn, KeyKind, KeySpec};
//!
//! let renderer = DdlRenderer::default();
//! let sort = KeySpec::new(KeyKind::Sort).column(KeyColumn::desc("ts"));
//! assert_eq!(renderer.key(&sort), "SORT KEY (`ts` DESC)");
//! ```

pub mod ddl;
pub mod dialect;
pub mod error;
pub mod quoting;
pub mod reflection;
pub mod schema;
pub mod types;

pub use ddl::DdlRenderer;
pub use dialect::{Dialect, MySqlDialect, SingleStoreDialect};
pub use error::{Error, Result};
pub use quoting::IdentifierQuoting;
pub use reflection::{Diagnostic, DiagnosticKind, Reflection, TableDefinitionParser};
pub use schema::{ColumnSpec, KeyColumn, KeyKind, KeySpec, ParsedTableDefinition, SortDirection};
pub use types::DataType;
