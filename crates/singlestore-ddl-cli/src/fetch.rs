//! Fetching `SHOW CREATE TABLE` output from a live server.

use singlestore_ddl::dialect::{Dialect, SingleStoreDialect};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::debug;

use crate::error::{CliError, Result};

/// Builds the `SHOW CREATE TABLE` statement for `table`, which may be
/// qualified as `database.table`.
///
/// # Errors
///
/// Returns [`CliError::InvalidTableName`] for an empty name, an empty
/// qualifier or more than one qualifier, and [`CliError::Parser`] if the
/// dialect's quoting is invalid.
pub fn show_create_sql(dialect: &impl Dialect, table: &str) -> Result<String> {
    let parts: Vec<&str> = table.split('.').collect();
    if parts.len() > 2 || parts.iter().any(|p| p.is_empty()) {
        return Err(CliError::InvalidTableName(table.to_string()));
    }
    let quoted = parts
        .iter()
        .map(|p| dialect.quote_identifier(p))
        .collect::<singlestore_ddl::Result<Vec<_>>>()?;
    Ok(format!("SHOW CREATE TABLE {}", quoted.join(".")))
}

/// Fetches table definitions over a MySQL-protocol connection.
pub struct TableFetcher {
    pool: MySqlPool,
}

impl TableFetcher {
    /// Wraps an existing pool.
    #[must_use]
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Connects to `url` with a single-connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Returns `true` if the session's SQL mode contains `ANSI_QUOTES`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn ansi_quotes(&self) -> Result<bool> {
        let (mode,): (String,) = sqlx::query_as("SELECT @@SESSION.sql_mode")
            .fetch_one(&self.pool)
            .await?;
        debug!(sql_mode = %mode, "detected SQL mode");
        Ok(mode.split(',').any(|m| m.trim().eq_ignore_ascii_case("ANSI_QUOTES")))
    }

    /// Runs `SHOW CREATE TABLE` and returns the definition text.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid, the query fails or the
    /// server returns no row.
    pub async fn show_create_table(
        &self,
        dialect: &SingleStoreDialect,
        table: &str,
    ) -> Result<String> {
        let sql = show_create_sql(dialect, table)?;
        debug!(%sql, "fetching table definition");
        let row: Option<(String, String)> = sqlx::query_as(&sql)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|(_, definition)| definition)
            .ok_or_else(|| CliError::EmptyResult(table.to_string()))
    }
}
