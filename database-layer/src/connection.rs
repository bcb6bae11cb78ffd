// Database connection management
use crate::error::{DatabaseError, DatabaseResult};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Small connection pool for the one-shot startup checks
#[derive(Clone, Debug)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Build a pool for `connection_string` without opening a connection
    ///
    /// Connection failures surface on the first query, so they reach the
    /// caller as query errors instead of aborting before any check runs.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::ConnectionFailed`] if the URL cannot be parsed.
    pub fn connect_lazy(
        connection_string: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> DatabaseResult<Self> {
        let options = PgConnectOptions::from_str(connection_string)
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .min_connections(0)
            .acquire_timeout(acquire_timeout)
            .connect_lazy_with(options);

        info!(max_connections, "Database connection pool configured");

        Ok(Self { pool })
    }

    /// Get the underlying PgPool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
