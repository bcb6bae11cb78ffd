// Tenant configuration snapshot and validation policy
use database_layer::SchemaName;
use serde::{Deserialize, Serialize};

use crate::diagnostics::Severity;

/// Configuration keys as they appear in settings files and diagnostics
pub mod keys {
    pub const TENANT_APPS: &str = "tenant_apps";
    pub const INSTALLED_APPS: &str = "installed_apps";
    pub const EXTRA_SEARCH_PATHS: &str = "extra_search_paths";
    pub const PUBLIC_SCHEMA_NAME: &str = "public_schema_name";
}

pub const DEFAULT_PUBLIC_SCHEMA: &str = "public";
pub const DEFAULT_TENANT_AWARE_APP: &str = "tenant_schemas";

/// Immutable tenant configuration read once at process start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantConfiguration {
    /// Apps whose data lives in every tenant schema; `None` when never declared
    pub tenant_apps: Option<Vec<String>>,
    /// Load order of every app
    pub installed_apps: Vec<String>,
    /// Schemas appended to every search path; `None` when not configured
    pub extra_search_paths: Option<Vec<SchemaName>>,
    /// Reserved schema holding shared data
    pub public_schema_name: SchemaName,
    /// App that must load last so its command overrides win
    pub tenant_aware_app: String,
}

impl Default for TenantConfiguration {
    fn default() -> Self {
        Self {
            tenant_apps: None,
            installed_apps: Vec::new(),
            extra_search_paths: None,
            public_schema_name: DEFAULT_PUBLIC_SCHEMA.to_string(),
            tenant_aware_app: DEFAULT_TENANT_AWARE_APP.to_string(),
        }
    }
}

impl TenantConfiguration {
    pub fn with_tenant_apps<I, S>(mut self, apps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tenant_apps = Some(apps.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_installed_apps<I, S>(mut self, apps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.installed_apps = apps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extra_search_paths<I, S>(mut self, schemas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SchemaName>,
    {
        self.extra_search_paths = Some(schemas.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_public_schema_name<S: Into<SchemaName>>(mut self, name: S) -> Self {
        self.public_schema_name = name.into();
        self
    }

    pub fn with_tenant_aware_app<S: Into<String>>(mut self, app: S) -> Self {
        self.tenant_aware_app = app.into();
        self
    }
}

/// Escalation policy for the checks whose severity is a deployment choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Severity of an undeclared `tenant_apps`; `Advisory` keeps legacy behaviour
    pub missing_tenant_apps: Severity,
    /// Severity of a registry lookup failure other than an uninitialized registry
    pub registry_failure: Severity,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            missing_tenant_apps: Severity::Fatal,
            registry_failure: Severity::Advisory,
        }
    }
}

impl ValidationPolicy {
    /// Policy matching deployments that predate the fatal missing-apps check
    pub fn legacy() -> Self {
        Self {
            missing_tenant_apps: Severity::Advisory,
            ..Self::default()
        }
    }
}
