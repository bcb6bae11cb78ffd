// Settings model
use schema_guard::{TenantConfiguration, ValidationPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, SettingsError};

/// Everything the startup guard needs, read once per process
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardSettings {
    pub tenant: TenantConfiguration,
    pub registry: RegistrySettings,
    pub database: DatabaseSettings,
    pub policy: ValidationPolicy,
}

/// Where the tenant records live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// Relation holding one row per tenant; may be schema-qualified
    pub tenant_table: String,
    pub schema_name_column: String,
    /// Command suggested when the tenant table does not exist yet
    pub remediation: String,
    pub query_timeout_secs: Option<u64>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            tenant_table: "tenants".to_string(),
            schema_name_column: "schema_name".to_string(),
            remediation: "migrate_schemas --shared".to_string(),
            query_timeout_secs: None,
        }
    }
}

impl RegistrySettings {
    pub fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 2,
            acquire_timeout_secs: 10,
        }
    }
}

impl DatabaseSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl GuardSettings {
    /// Reject values that would make the registry query unsafe or meaningless
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidValue`] naming the offending key.
    pub fn check(&self) -> Result<()> {
        if self.tenant.public_schema_name.is_empty() {
            return Err(SettingsError::invalid(
                "tenant.public_schema_name",
                "must not be empty",
            ));
        }
        if self.tenant.tenant_aware_app.is_empty() {
            return Err(SettingsError::invalid(
                "tenant.tenant_aware_app",
                "must not be empty",
            ));
        }
        check_relation("registry.tenant_table", &self.registry.tenant_table)?;
        check_identifier("registry.schema_name_column", &self.registry.schema_name_column)?;
        if self.database.max_connections == 0 {
            return Err(SettingsError::invalid(
                "database.max_connections",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Render the effective settings as YAML, without the database URL
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Render`] if serialization fails.
    pub fn to_redacted_yaml(&self) -> Result<String> {
        let mut redacted = self.clone();
        if redacted.database.url.is_some() {
            redacted.database.url = Some("<redacted>".to_string());
        }
        Ok(serde_yaml::to_string(&redacted)?)
    }
}

fn check_relation(key: &str, relation: &str) -> Result<()> {
    let parts: Vec<&str> = relation.split('.').collect();
    if parts.len() > 2 {
        return Err(SettingsError::invalid(key, format!("'{relation}' has too many qualifiers")));
    }
    parts.into_iter().try_for_each(|part| check_identifier(key, part))
}

/// Plain SQL identifier: a letter or underscore, then letters, digits, `_` or `$`
fn check_identifier(key: &str, ident: &str) -> Result<()> {
    let mut chars = ident.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if valid_start && valid_rest && ident.len() <= 63 {
        Ok(())
    } else {
        Err(SettingsError::invalid(
            key,
            format!("'{ident}' is not a plain SQL identifier"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_check() {
        assert!(GuardSettings::default().check().is_ok());
    }

    #[test]
    fn test_schema_qualified_table_is_accepted() {
        let mut settings = GuardSettings::default();
        settings.registry.tenant_table = "shared.customers_client".to_string();
        assert!(settings.check().is_ok());
    }

    #[test]
    fn test_injection_in_table_is_rejected() {
        let mut settings = GuardSettings::default();
        settings.registry.tenant_table = "tenants; DROP TABLE tenants".to_string();

        let err = settings.check().unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { ref key, .. } if key == "registry.tenant_table"));
    }

    #[test]
    fn test_column_must_be_identifier() {
        let mut settings = GuardSettings::default();
        settings.registry.schema_name_column = "1schema".to_string();
        assert!(settings.check().is_err());
    }

    #[test]
    fn test_empty_public_schema_is_rejected() {
        let mut settings = GuardSettings::default();
        settings.tenant.public_schema_name = String::new();
        assert!(settings.check().is_err());
    }

    #[test]
    fn test_redacted_yaml_hides_database_url() {
        let mut settings = GuardSettings::default();
        settings.database.url = Some("postgresql://user:secret@db/app".to_string());

        let yaml = settings.to_redacted_yaml().unwrap();
        assert!(!yaml.contains("secret"));
        assert!(yaml.contains("<redacted>"));
    }
}
