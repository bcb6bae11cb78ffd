//! PostgreSQL-backed schema registry
//!
//! Reads the schema name column of the tenants relation. The relation and
//! column are configurable; both are quoted before being spliced into SQL.

use crate::{
    error::RegistryError,
    registry::{SchemaName, SchemaRegistryQuery},
};
use async_trait::async_trait;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_REMEDIATION: &str = "migrate_schemas --shared";

/// PostgreSQL-backed schema registry
pub struct PostgresSchemaRegistry {
    pool: PgPool,
    table: String,
    column: String,
    remediation: String,
    query_timeout: Option<Duration>,
}

impl PostgresSchemaRegistry {
    /// Create a registry reading `column` from `table`
    ///
    /// `table` may be schema-qualified (`shared.tenants`).
    pub fn new(pool: PgPool, table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
            column: column.into(),
            remediation: DEFAULT_REMEDIATION.to_string(),
            query_timeout: None,
        }
    }

    /// Command operators should run when the tenants relation is missing
    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = remediation.into();
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    fn list_sql(&self) -> String {
        let column = quote_identifier(&self.column);
        format!(
            "SELECT {column}::text FROM {} ORDER BY {column}",
            quote_qualified(&self.table)
        )
    }

    async fn fetch(&self) -> Result<Vec<SchemaName>, RegistryError> {
        let sql = self.list_sql();
        debug!(sql = %sql, "Listing tenant schemas");

        sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                let classified = RegistryError::classify(&e, &self.table, &self.remediation);
                if !classified.is_uninitialized() {
                    warn!(relation = %self.table, error = %e, "Schema registry query failed");
                }
                classified
            })
    }
}

#[async_trait]
impl SchemaRegistryQuery for PostgresSchemaRegistry {
    async fn list_schema_names(&self) -> Result<Vec<SchemaName>, RegistryError> {
        match self.query_timeout {
            Some(limit) => tokio::time::timeout(limit, self.fetch())
                .await
                .map_err(|_| RegistryError::Timeout {
                    seconds: limit.as_secs(),
                })?,
            None => self.fetch().await,
        }
    }
}

/// Quote a single SQL identifier, doubling embedded quotes
pub fn quote_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a possibly schema-qualified relation name part by part
pub fn quote_qualified(relation: &str) -> String {
    relation
        .split('.')
        .map(quote_identifier)
        .collect::<Vec<_>>()
        .join(".")
}
