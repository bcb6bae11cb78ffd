// Layered settings loader
use config::{Config, Environment, File, FileFormat};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::Result;
use crate::settings::GuardSettings;

pub const DEFAULT_SETTINGS_FILE: &str = "tenant-guard.yaml";
pub const ENV_PREFIX: &str = "TENANT_GUARD";

const LIST_KEYS: [&str; 3] = [
    "tenant.tenant_apps",
    "tenant.installed_apps",
    "tenant.extra_search_paths",
];

/// Builds a [`GuardSettings`] snapshot from file and environment
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    file: PathBuf,
    file_required: bool,
    env: Option<HashMap<String, String>>,
    database_url: Option<String>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_SETTINGS_FILE),
            file_required: false,
            env: None,
            database_url: None,
        }
    }

    /// Read settings from `path`; the file must exist
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = path.as_ref().to_path_buf();
        self.file_required = true;
        self
    }

    /// Use `vars` instead of the process environment
    pub fn with_env(mut self, vars: HashMap<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// Highest-precedence database URL, e.g. from a CLI flag
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        self.database_url = url;
        self
    }

    fn environment(&self) -> Environment {
        let env = LIST_KEYS.iter().fold(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .try_parsing(true),
            |env, key| env.with_list_parse_key(key),
        );
        env.source(self.env.clone())
    }

    fn plain_database_url(&self) -> Option<String> {
        match &self.env {
            Some(vars) => vars.get("DATABASE_URL").cloned(),
            None => std::env::var("DATABASE_URL").ok(),
        }
    }

    /// Assemble and check the settings snapshot
    ///
    /// # Errors
    ///
    /// Fails when a source cannot be read or parsed, or when
    /// [`GuardSettings::check`] rejects a value.
    pub fn load(&self) -> Result<GuardSettings> {
        let file = self.file.to_string_lossy();
        debug!(file = %file, required = self.file_required, "Loading tenant guard settings");

        let url = self.database_url.clone().or_else(|| self.plain_database_url());

        let settings: GuardSettings = Config::builder()
            .add_source(File::new(&file, FileFormat::Yaml).required(self.file_required))
            .add_source(self.environment())
            .set_override_option("database.url", url)?
            .build()?
            .try_deserialize()?;

        settings.check()?;

        info!(
            tenant_apps = settings.tenant.tenant_apps.as_ref().map_or(0, Vec::len),
            installed_apps = settings.tenant.installed_apps.len(),
            extra_search_paths = settings.tenant.extra_search_paths.is_some(),
            "Tenant guard settings loaded"
        );
        Ok(settings)
    }
}
