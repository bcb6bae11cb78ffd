use error_common::{codes, TenantGuardError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Configuration source failed: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Configuration rendering failed: {0}")]
    Render(#[from] serde_yaml::Error),
}

impl SettingsError {
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Source(_) | Self::Render(_) => codes::settings::SOURCE_FAILED,
            Self::InvalidValue { .. } => codes::settings::INVALID_VALUE,
        }
    }
}

impl From<SettingsError> for TenantGuardError {
    fn from(err: SettingsError) -> Self {
        TenantGuardError::ConfigError(format!("[{}] {}", err.code(), err))
    }
}

pub type Result<T> = std::result::Result<T, SettingsError>;
