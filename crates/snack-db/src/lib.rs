//! # snack-db
//!
//! libSQL database operations for the snackbox catalog.
//!
//! Holds the relational state search reads from: snacks, the three tag master
//! tables and their join tables, and the like/review/view tables that feed
//! per-snack metrics. Works against a local file, `:memory:`, or a hosted
//! libSQL database.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod trigram;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for the snack catalog.
///
/// Constructed explicitly and passed to whoever needs it; there is no
/// process-wide client.
pub struct SnackDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    remote: bool,
}

impl SnackDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let snack_db = Self {
            db,
            conn,
            remote: false,
        };
        snack_db.run_migrations().await?;
        tracing::debug!(path, "opened local database");
        Ok(snack_db)
    }

    /// Open a hosted libSQL database over the network.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;

        let snack_db = Self {
            db,
            conn,
            remote: true,
        };
        snack_db.run_migrations().await?;
        tracing::debug!(url, "connected to remote database");
        Ok(snack_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle talks to a hosted database.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"snk-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Run a query returning a single TEXT column and collect it.
    pub(crate) async fn query_ids(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .conn
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next().await? {
            ids.push(row.get::<String>(0)?);
        }
        Ok(ids)
    }
}
