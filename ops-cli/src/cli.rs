// Command-line arguments and the check workflow
use clap::Parser;
use colored::Colorize;
use config_engine::{GuardSettings, SettingsLoader};
use database_layer::{
    DatabasePool, InMemorySchemaRegistry, PostgresSchemaRegistry, RegistryError,
    SchemaRegistryQuery,
};
use error_common::Result;
use schema_guard::{ConfigValidator, DiagnosticReporter, ValidationReport};
use std::path::PathBuf;
use tracing::{info, warn};

/// Validate multi-tenant schema configuration before the application starts
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tenant-check")]
#[command(about = "Startup guard for schema-per-tenant configuration")]
pub struct Args {
    /// Settings file path (defaults to tenant-guard.yaml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Database URL; overrides settings and the environment file
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Skip the database and treat the tenant registry as empty
    #[arg(long)]
    pub offline: bool,

    /// Print the effective settings before validating
    #[arg(long)]
    pub print_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit JSON log lines
    #[arg(long)]
    pub json: bool,
}

impl Args {
    fn loader(&self) -> SettingsLoader {
        let loader = SettingsLoader::new().with_database_url(self.database_url.clone());
        match &self.config {
            Some(path) => loader.with_file(path),
            None => loader,
        }
    }
}

/// Load settings and run the guard once
///
/// Storage problems never abort the run here; they reach the validator as
/// registry failures and the policy decides their severity.
///
/// # Errors
///
/// Fails when settings cannot be loaded or a fatal check fails.
pub async fn run(args: &Args) -> Result<ValidationReport> {
    let settings = args.loader().load()?;

    if args.print_config {
        println!("{}", settings.to_redacted_yaml()?);
    }

    let registry = open_registry(&settings, args.offline);
    let validator = ConfigValidator::new().with_policy(settings.policy);
    let report = validator.run(&settings.tenant, registry.as_ref()).await;

    DiagnosticReporter::new().report(report.diagnostics())?;
    print_verdict(&report);
    Ok(report)
}

/// Pick the registry adapter; storage is only touched if the registry is queried
fn open_registry(settings: &GuardSettings, offline: bool) -> Box<dyn SchemaRegistryQuery> {
    if offline || settings.tenant.extra_search_paths.is_none() {
        info!(offline, "Tenant registry lookup not needed or disabled");
        return Box::new(InMemorySchemaRegistry::empty());
    }

    let Some(url) = settings.database.url.as_deref() else {
        warn!("No database.url (or DATABASE_URL) configured for the tenant registry");
        return Box::new(InMemorySchemaRegistry::failing(RegistryError::Storage {
            reason: "database.url is not configured; pass --offline to skip the registry"
                .to_string(),
        }));
    };

    let db = match DatabasePool::connect_lazy(
        url,
        settings.database.max_connections,
        settings.database.acquire_timeout(),
    ) {
        Ok(db) => db,
        Err(e) => {
            warn!(error = %e, "Tenant registry database is unusable");
            return Box::new(InMemorySchemaRegistry::failing(RegistryError::Storage {
                reason: e.to_string(),
            }));
        }
    };

    let mut registry = PostgresSchemaRegistry::new(
        db.pool().clone(),
        settings.registry.tenant_table.clone(),
        settings.registry.schema_name_column.clone(),
    )
    .with_remediation(settings.registry.remediation.clone());
    if let Some(timeout) = settings.registry.query_timeout() {
        registry = registry.with_query_timeout(timeout);
    }

    Box::new(registry)
}

/// One-line verdict; individual diagnostics are already on the log
fn print_verdict(report: &ValidationReport) {
    let advisories = report.advisories().count();
    if advisories == 0 {
        eprintln!("✅ {}", "Tenant configuration is valid".bright_green());
    } else {
        let note = format!("({advisories} advisory finding(s) logged)");
        eprintln!(
            "✅ {} {}",
            "Tenant configuration is valid".bright_green(),
            note.as_str().bright_yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_flags() {
        let args = Args::try_parse_from([
            "tenant-check",
            "--config",
            "deploy/tenant-guard.yaml",
            "--offline",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("deploy/tenant-guard.yaml")));
        assert!(args.offline);
        assert!(args.json);
        assert!(!args.verbose);
    }

    #[tokio::test]
    async fn test_registry_skipped_without_extra_search_paths() {
        let settings = GuardSettings::default();
        let registry = open_registry(&settings, false);
        assert_eq!(registry.list_schema_names().await.unwrap(), Vec::<String>::new());
    }

    #[tokio::test]
    async fn test_missing_url_becomes_registry_failure() {
        let mut settings = GuardSettings::default();
        settings.tenant.extra_search_paths = Some(vec!["extensions".to_string()]);

        let err = open_registry(&settings, false).list_schema_names().await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Storage { ref reason } if reason.contains("database.url")
        ));
    }

    #[tokio::test]
    async fn test_malformed_url_becomes_registry_failure() {
        let mut settings = GuardSettings::default();
        settings.tenant.extra_search_paths = Some(vec!["extensions".to_string()]);
        settings.database.url = Some("not a url".to_string());

        let err = open_registry(&settings, false).list_schema_names().await.unwrap_err();
        assert!(matches!(err, RegistryError::Storage { .. }));
    }
}
