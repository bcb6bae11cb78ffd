//! Settings loader tests
//!
//! Environment input is injected through `SettingsLoader::with_env`, so these
//! tests never touch the process environment.

use config_engine::*;
use schema_guard::Severity;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn yaml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_loads_tenant_section_from_yaml() {
    let file = yaml_file(
        r#"
tenant:
  tenant_apps: [tenants]
  installed_apps: [tenants, app2, tenant_schemas]
  extra_search_paths: [public]
registry:
  tenant_table: customers_client
  query_timeout_secs: 5
"#,
    );

    let settings = SettingsLoader::new()
        .with_file(file.path())
        .with_env(HashMap::new())
        .load()
        .unwrap();

    assert_eq!(settings.tenant.tenant_apps, Some(vec!["tenants".to_string()]));
    assert_eq!(settings.tenant.installed_apps.last().map(String::as_str), Some("tenant_schemas"));
    assert_eq!(settings.tenant.extra_search_paths, Some(vec!["public".to_string()]));
    assert_eq!(settings.tenant.public_schema_name, "public");
    assert_eq!(settings.registry.tenant_table, "customers_client");
    assert_eq!(settings.registry.schema_name_column, "schema_name");
    assert_eq!(settings.registry.query_timeout_secs, Some(5));
}

#[test]
fn test_missing_default_file_uses_defaults() {
    // No tenant-guard.yaml in the crate directory; the default file is optional
    let settings = SettingsLoader::new().with_env(HashMap::new()).load().unwrap();

    assert!(settings.tenant.tenant_apps.is_none());
    assert!(settings.database.url.is_none());
    assert_eq!(settings.policy, schema_guard::ValidationPolicy::default());
    assert_eq!(settings.registry, RegistrySettings::default());
}

#[test]
fn test_explicit_file_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.yaml");

    let err = SettingsLoader::new()
        .with_file(&missing)
        .with_env(HashMap::new())
        .load()
        .unwrap_err();
    assert!(matches!(err, SettingsError::Source(_)));
}

#[test]
fn test_environment_overrides_file() {
    let file = yaml_file(
        r#"
tenant:
  tenant_apps: [tenants]
  public_schema_name: public
"#,
    );

    let settings = SettingsLoader::new()
        .with_file(file.path())
        .with_env(env(&[
            ("TENANT_GUARD__TENANT__PUBLIC_SCHEMA_NAME", "shared"),
            ("TENANT_GUARD__TENANT__EXTRA_SEARCH_PATHS", "extensions,postgis"),
            ("TENANT_GUARD__POLICY__MISSING_TENANT_APPS", "advisory"),
        ]))
        .load()
        .unwrap();

    assert_eq!(settings.tenant.public_schema_name, "shared");
    assert_eq!(
        settings.tenant.extra_search_paths,
        Some(vec!["extensions".to_string(), "postgis".to_string()])
    );
    assert_eq!(settings.policy.missing_tenant_apps, Severity::Advisory);
}

#[test]
fn test_database_url_precedence() {
    let file = yaml_file("database:\n  url: postgresql://file/app\n");

    let from_env = SettingsLoader::new()
        .with_file(file.path())
        .with_env(env(&[("DATABASE_URL", "postgresql://env/app")]))
        .load()
        .unwrap();
    assert_eq!(from_env.database.url.as_deref(), Some("postgresql://env/app"));

    let from_flag = SettingsLoader::new()
        .with_file(file.path())
        .with_env(env(&[("DATABASE_URL", "postgresql://env/app")]))
        .with_database_url(Some("postgresql://flag/app".to_string()))
        .load()
        .unwrap();
    assert_eq!(from_flag.database.url.as_deref(), Some("postgresql://flag/app"));
}

#[test]
fn test_invalid_table_name_is_rejected() {
    let file = yaml_file("registry:\n  tenant_table: \"tenants where 1=1\"\n");

    let err = SettingsLoader::new()
        .with_file(file.path())
        .with_env(HashMap::new())
        .load()
        .unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue { .. }));
}
