//! Read-only storage adapters for the tenant schema registry
//!
//! The startup guard never writes to storage. This crate owns the only
//! query it issues: listing the schema names of every registered tenant.
//!
//! # Key Features
//!
//! - **Backend-neutral contract**: [`SchemaRegistryQuery`] hides the storage engine
//! - **Error classification at the boundary**: a missing tenants relation is
//!   reported as [`RegistryError::Uninitialized`] from its SQLSTATE, never by
//!   matching message text
//! - **In-memory adapter**: for tests and for running the guard offline
//!
//! # Example
//!
//! ```rust,no_run
//! use database_layer::{DatabasePool, PostgresSchemaRegistry, SchemaRegistryQuery};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let url = "postgresql://localhost/app";
//!     let db = DatabasePool::connect_lazy(url, 2, Duration::from_secs(10))?;
//!
//!     let registry = PostgresSchemaRegistry::new(db.pool().clone(), "tenants", "schema_name")
//!         .with_remediation("migrate_schemas --shared")
//!         .with_query_timeout(Duration::from_secs(5));
//!
//!     for schema in registry.list_schema_names().await? {
//!         println!("tenant schema: {schema}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod connection;
pub mod error;
pub mod registry;

pub use connection::*;
pub use error::*;
pub use registry::*;
