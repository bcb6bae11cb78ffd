// Startup validation of the tenant configuration
use database_layer::{RegistryError, SchemaName, SchemaRegistryQuery};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

use crate::config::{keys, TenantConfiguration, ValidationPolicy};
use crate::diagnostics::{
    Diagnostic, DiagnosticReporter, Severity, ValidationReport, ValidationState,
};
use crate::error::{Advisory, ConfigError};

/// Runs every configuration check against a snapshot and a live registry
#[derive(Debug, Clone, Default)]
pub struct ConfigValidator {
    policy: ValidationPolicy,
    reporter: DiagnosticReporter,
}

impl ConfigValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validate `config` and report the outcome
    ///
    /// Advisories are logged and never fail the call.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`ConfigError`] after every check has run.
    pub async fn validate<R>(
        &self,
        config: &TenantConfiguration,
        registry: &R,
    ) -> Result<(), ConfigError>
    where
        R: SchemaRegistryQuery + ?Sized,
    {
        let report = self.run(config, registry).await;
        self.reporter.report(report.diagnostics())
    }

    /// Run every applicable check without reporting
    #[instrument(skip_all, fields(public_schema = %config.public_schema_name))]
    pub async fn run<R>(&self, config: &TenantConfiguration, registry: &R) -> ValidationReport
    where
        R: SchemaRegistryQuery + ?Sized,
    {
        debug!(state = ?ValidationState::Validating, "Validating tenant configuration");

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        diagnostics.extend(check_tenant_apps(config, &self.policy));
        diagnostics.extend(check_app_ordering(config));

        if let Some(extra) = config.extra_search_paths.as_deref() {
            diagnostics.extend(check_reserved_schema(extra, &config.public_schema_name));

            let (registered, lookup) = lookup_registry(registry, &self.policy).await;
            diagnostics.extend(lookup);
            diagnostics.extend(check_schema_conflicts(extra, &registered));
        }

        let report = ValidationReport::new(diagnostics);
        info!(
            state = ?report.state(),
            fatal = report.fatal().count(),
            advisories = report.advisories().count(),
            "Tenant configuration validated"
        );
        report
    }
}

/// Presence and emptiness of `tenant_apps`; one finding at most
fn check_tenant_apps(
    config: &TenantConfiguration,
    policy: &ValidationPolicy,
) -> Option<Diagnostic> {
    match config.tenant_apps.as_deref() {
        None => Some(Diagnostic::at(
            policy.missing_tenant_apps,
            ConfigError::MissingTenantApps {
                key: keys::TENANT_APPS,
            },
        )),
        Some([]) => Some(Diagnostic::Fatal(ConfigError::EmptyTenantApps {
            key: keys::TENANT_APPS,
        })),
        Some(_) => None,
    }
}

fn check_app_ordering(config: &TenantConfiguration) -> Option<Diagnostic> {
    let last = config.installed_apps.last();
    if last == Some(&config.tenant_aware_app) {
        return None;
    }
    Some(Diagnostic::Advisory(Advisory::Ordering {
        expected_last: config.tenant_aware_app.clone(),
        actual_last: last.cloned(),
    }))
}

fn check_reserved_schema(extra: &[SchemaName], public_schema: &str) -> Option<Diagnostic> {
    extra
        .iter()
        .any(|schema| schema == public_schema)
        .then(|| {
            Diagnostic::Fatal(ConfigError::ReservedSchema {
                key: keys::EXTRA_SEARCH_PATHS,
                schema: public_schema.to_string(),
            })
        })
}

/// Query the registry; an uninitialized registry counts as empty
async fn lookup_registry<R>(
    registry: &R,
    policy: &ValidationPolicy,
) -> (Vec<SchemaName>, Option<Diagnostic>)
where
    R: SchemaRegistryQuery + ?Sized,
{
    match registry.list_schema_names().await {
        Ok(names) => (names, None),
        Err(RegistryError::Uninitialized {
            relation,
            remediation,
        }) => (
            Vec::new(),
            Some(Diagnostic::Advisory(Advisory::UninitializedRegistry {
                relation,
                remediation,
            })),
        ),
        Err(err) => {
            let reason = err.to_string();
            let diagnostic = match policy.registry_failure {
                Severity::Fatal => Diagnostic::Fatal(ConfigError::RegistryUnavailable {
                    key: keys::EXTRA_SEARCH_PATHS,
                    reason,
                }),
                Severity::Advisory => {
                    Diagnostic::Advisory(Advisory::UnclassifiedRegistryFailure { reason })
                }
            };
            (Vec::new(), Some(diagnostic))
        }
    }
}

fn check_schema_conflicts(extra: &[SchemaName], registered: &[SchemaName]) -> Option<Diagnostic> {
    let registered: BTreeSet<&SchemaName> = registered.iter().collect();
    let conflicts: BTreeSet<SchemaName> = extra
        .iter()
        .filter(|schema| registered.contains(schema))
        .cloned()
        .collect();

    if conflicts.is_empty() {
        return None;
    }
    Some(Diagnostic::Fatal(ConfigError::SchemaConflict {
        key: keys::EXTRA_SEARCH_PATHS,
        conflicts,
    }))
}
