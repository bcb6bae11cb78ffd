//! Common error handling utilities for the tenant schema startup guard
//!
//! This crate provides the process-level error type returned from the
//! `tenant-check` entry point and the stable diagnostic codes attached to
//! every finding the validator produces.
//!
//! # Error Categories
//!
//! - **ConfigError**: settings could not be loaded or are malformed
//! - **ValidationError**: the tenant configuration failed a fatal check
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, TenantGuardError};
//!
//! fn require_tenant_apps(apps: &[String]) -> Result<(), TenantGuardError> {
//!     if apps.is_empty() {
//!         return Err(TenantGuardError::ValidationError {
//!             code: codes::config::EMPTY_TENANT_APPS,
//!             message: "TENANT_APPS is empty".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_tenant_apps(&[]).is_err());
//! ```

pub mod codes;
pub mod types;

pub use types::*;
