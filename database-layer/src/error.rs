use thiserror::Error;

/// SQLSTATE raised by Postgres when a relation does not exist
pub const UNDEFINED_TABLE: &str = "42P01";

/// SQLSTATE raised by Postgres when the schema of a qualified name does not exist
pub const INVALID_SCHEMA_NAME: &str = "3F000";

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Failure modes of a schema registry lookup
///
/// Adapters translate backend errors into these variants so callers can
/// branch on the kind without knowing which storage engine answered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The relation holding tenant records has not been created yet
    #[error("relation \"{relation}\" does not exist; run `{remediation}` to create it")]
    Uninitialized { relation: String, remediation: String },

    /// The lookup did not answer in time
    #[error("schema registry query timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Any other storage failure
    #[error("schema registry query failed: {reason}")]
    Storage { reason: String },
}

impl RegistryError {
    /// Classify a sqlx failure for the given tenants relation
    ///
    /// A missing relation and a missing schema of a qualified relation both
    /// mean the shared migrations have not run yet.
    pub fn classify(err: &sqlx::Error, relation: &str, remediation: &str) -> Self {
        match err {
            sqlx::Error::Database(db)
                if matches!(
                    db.code().as_deref(),
                    Some(UNDEFINED_TABLE | INVALID_SCHEMA_NAME)
                ) =>
            {
                Self::Uninitialized {
                    relation: relation.to_string(),
                    remediation: remediation.to_string(),
                }
            }
            other => Self::Storage {
                reason: other.to_string(),
            },
        }
    }

    pub fn is_uninitialized(&self) -> bool {
        matches!(self, Self::Uninitialized { .. })
    }
}
