//! Generic MySQL-family dialect.

use super::Dialect;

/// The MySQL-family base dialect: backtick quoting and the generic key,
/// foreign key and check patterns.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }
}
