//! Settings management for the tenant schema startup guard
//!
//! Settings are assembled once at process start, from lowest to highest
//! precedence:
//!
//! - **Defaults**: built into [`GuardSettings`]
//! - **YAML file**: `tenant-guard.yaml` unless another path is given
//! - **Environment**: `TENANT_GUARD__<SECTION>__<KEY>`, lists comma separated
//! - **`DATABASE_URL`**: overrides `database.url`
//!
//! The result is an immutable snapshot handed to the validator.
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::SettingsLoader;
//!
//! let settings = SettingsLoader::new()
//!     .with_file("config/tenant-guard.yaml")
//!     .load()?;
//!
//! println!("public schema: {}", settings.tenant.public_schema_name);
//! # Ok::<(), config_engine::SettingsError>(())
//! ```
//!
//! ```yaml
//! tenant:
//!   tenant_apps: [tenants]
//!   installed_apps: [tenants, billing, tenant_schemas]
//!   extra_search_paths: [extensions]
//!   public_schema_name: public
//! registry:
//!   tenant_table: tenants
//!   schema_name_column: schema_name
//!   remediation: migrate_schemas --shared
//!   query_timeout_secs: 5
//! database:
//!   url: postgresql://localhost/app
//! policy:
//!   missing_tenant_apps: fatal
//!   registry_failure: advisory
//! ```

pub mod error;
pub mod loader;
pub mod settings;

pub use error::*;
pub use loader::*;
pub use settings::*;
