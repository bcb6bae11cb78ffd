//! Operator entry point for the tenant schema startup guard
//!
//! `tenant-check` loads the settings snapshot, connects to storage only when
//! the registry has to be consulted, runs every check and exits non-zero on
//! the first fatal finding.
//!
//! # Example Usage
//!
//! ```bash
//! # Validate using tenant-guard.yaml and DATABASE_URL
//! tenant-check
//!
//! # Validate a specific file without touching the database
//! tenant-check --config deploy/tenant-guard.yaml --offline
//!
//! # Show the effective settings, then validate with JSON logs
//! tenant-check --print-config --json
//! ```

pub mod cli;
pub mod logging;

pub use cli::*;
pub use logging::*;
