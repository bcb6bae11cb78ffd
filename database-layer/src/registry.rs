use crate::error::RegistryError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

pub mod postgres;

pub use postgres::PostgresSchemaRegistry;

/// Opaque, case-sensitive schema identifier
pub type SchemaName = String;

/// Read access to the set of tenant schemas known to storage
///
/// Implementations must query storage on every call; nothing is cached
/// between validation runs.
#[async_trait]
pub trait SchemaRegistryQuery: Send + Sync {
    /// List the schema names of every registered tenant
    async fn list_schema_names(&self) -> Result<Vec<SchemaName>, RegistryError>;
}

/// In-memory registry for testing and offline checks
pub struct InMemorySchemaRegistry {
    outcome: Result<Vec<SchemaName>, RegistryError>,
    calls: AtomicUsize,
}

impl InMemorySchemaRegistry {
    pub fn new<I, S>(schemas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SchemaName>,
    {
        Self {
            outcome: Ok(schemas.into_iter().map(Into::into).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A registry whose storage has not been migrated yet
    pub fn empty() -> Self {
        Self::new(Vec::<SchemaName>::new())
    }

    /// A registry that fails every lookup with `error`
    pub fn failing(error: RegistryError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of lookups served so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemorySchemaRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

#[async_trait]
impl SchemaRegistryQuery for InMemorySchemaRegistry {
    async fn list_schema_names(&self) -> Result<Vec<SchemaName>, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
