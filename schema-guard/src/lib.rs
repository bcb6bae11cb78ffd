//! Startup guard for schema-per-tenant deployments
//!
//! Runs once before the application serves requests and verifies that the
//! tenant configuration is internally consistent and does not collide with
//! the reserved public schema or with schemas already owned by tenants.
//!
//! # Checks
//!
//! 1. `tenant_apps` is declared (fatal by default, see [`ValidationPolicy`])
//! 2. `tenant_apps` is not empty (fatal)
//! 3. the tenant-aware app is the last entry of `installed_apps` (advisory)
//! 4. the public schema is not listed in `extra_search_paths` (fatal)
//! 5. no registered tenant schema is listed in `extra_search_paths` (fatal)
//!
//! Checks 4 and 5 only run when `extra_search_paths` is configured. Every
//! applicable check runs; fatal findings are collected and the first one is
//! returned after all of them have been reported.
//!
//! # Example
//!
//! ```rust
//! use database_layer::InMemorySchemaRegistry;
//! use schema_guard::{ConfigError, ConfigValidator, TenantConfiguration};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let config = TenantConfiguration::default()
//!     .with_tenant_apps(["tenants"])
//!     .with_installed_apps(["tenants", "app2", "tenant_schemas"])
//!     .with_extra_search_paths(["public"]);
//!
//! let registry = InMemorySchemaRegistry::empty();
//! let result = ConfigValidator::new().validate(&config, &registry).await;
//!
//! assert!(matches!(result, Err(ConfigError::ReservedSchema { ref schema, .. }) if schema == "public"));
//! # }
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod validator;

pub use config::*;
pub use diagnostics::*;
pub use error::*;
pub use validator::*;

pub use database_layer::{RegistryError, SchemaName, SchemaRegistryQuery};
