use database_layer::SchemaName;
use error_common::{codes, TenantGuardError};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Fatal tenant configuration violations
///
/// Every variant names the offending key and, where one exists, the exact
/// offending values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} setting not set")]
    MissingTenantApps { key: &'static str },

    #[error("{key} is empty. Maybe you don't need tenant schemas?")]
    EmptyTenantApps { key: &'static str },

    #[error("{schema} can not be included on {key}")]
    ReservedSchema { key: &'static str, schema: SchemaName },

    #[error("Do not include tenant schemas ({}) on {key}", join_names(.conflicts))]
    SchemaConflict {
        key: &'static str,
        conflicts: BTreeSet<SchemaName>,
    },

    #[error("tenant schema registry unavailable while checking {key}: {reason}")]
    RegistryUnavailable { key: &'static str, reason: String },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingTenantApps { .. } => codes::config::MISSING_TENANT_APPS,
            Self::EmptyTenantApps { .. } => codes::config::EMPTY_TENANT_APPS,
            Self::ReservedSchema { .. } => codes::config::RESERVED_SCHEMA,
            Self::SchemaConflict { .. } => codes::config::SCHEMA_CONFLICT,
            Self::RegistryUnavailable { .. } => codes::config::REGISTRY_UNAVAILABLE,
        }
    }

    /// Configuration key the violation was found under
    pub fn key(&self) -> &'static str {
        match self {
            Self::MissingTenantApps { key }
            | Self::EmptyTenantApps { key }
            | Self::ReservedSchema { key, .. }
            | Self::SchemaConflict { key, .. }
            | Self::RegistryUnavailable { key, .. } => key,
        }
    }
}

impl From<ConfigError> for TenantGuardError {
    fn from(err: ConfigError) -> Self {
        TenantGuardError::ValidationError {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Non-fatal findings surfaced to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// The tenant-aware app is not the last installed app
    Ordering {
        expected_last: String,
        actual_last: Option<String>,
    },

    /// The tenants relation does not exist yet; treated as an empty registry
    UninitializedRegistry {
        relation: String,
        remediation: String,
    },

    /// The registry lookup failed for a reason other than missing storage
    UnclassifiedRegistryFailure { reason: String },

    /// A fatal check reported at advisory level by policy
    Downgraded(ConfigError),
}

impl Advisory {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ordering { .. } => codes::advisory::APP_ORDERING,
            Self::UninitializedRegistry { .. } => codes::advisory::UNINITIALIZED_REGISTRY,
            Self::UnclassifiedRegistryFailure { .. } => {
                codes::advisory::UNCLASSIFIED_REGISTRY_FAILURE
            }
            Self::Downgraded(err) => err.code(),
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ordering {
                expected_last,
                actual_last,
            } => write!(
                f,
                "You should put '{expected_last}' at the end of installed_apps \
                 (currently last: {}), e.g. installed_apps = tenant_apps + shared_apps + ['{expected_last}']. \
                 This is necessary to override the built-in management commands with their schema-aware implementations.",
                actual_last.as_deref().unwrap_or("<none>")
            ),
            Self::UninitializedRegistry {
                relation,
                remediation,
            } => write!(
                f,
                "Looks like the tenants table \"{relation}\" has not been synced to the database yet. \
                 Run `{remediation}` to do so."
            ),
            Self::UnclassifiedRegistryFailure { reason } => write!(
                f,
                "Could not read the tenant schema registry; tenant schemas in extra_search_paths were not checked: {reason}"
            ),
            Self::Downgraded(err) => write!(f, "{err}"),
        }
    }
}

fn join_names(names: &BTreeSet<SchemaName>) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
