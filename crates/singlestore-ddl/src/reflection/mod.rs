//! Reflection of `SHOW CREATE TABLE` output.
//!
//! The parser is line oriented. Each line is classified by its prefix:
//! column definitions go to the column parser, the closing `) ...` line to
//! the table options parser, and everything else is matched against an
//! ordered [`PatternTable`] of key and constraint patterns. Lines nothing
//! recognizes are skipped and reported as [`Diagnostic`]s.

mod columns;
mod constraints;
mod diagnostics;
mod options;
mod parser;
mod patterns;
pub(crate) mod text;

pub use columns::ColumnParser;
pub use constraints::{parse_constraint, parse_key_columns, Constraint};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use options::TableOptionsParser;
pub use parser::{classify_line, LineClass, Reflection, TableDefinitionParser};
pub use patterns::{LineKind, Pattern, PatternTable};
