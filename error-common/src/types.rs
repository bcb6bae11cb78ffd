use thiserror::Error;

/// Process-level error surfaced from the startup guard
#[derive(Error, Debug)]
pub enum TenantGuardError {
    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A fatal tenant configuration check failed
    #[error("[{code}] {message}")]
    ValidationError { code: &'static str, message: String },
}

impl TenantGuardError {
    /// Stable code for log correlation
    pub fn code(&self) -> &'static str {
        match self {
            Self::ValidationError { code, .. } => *code,
            Self::ConfigError(_) => crate::codes::settings::SOURCE_FAILED,
        }
    }
}

/// Result type alias for guard operations
pub type Result<T> = std::result::Result<T, TenantGuardError>;

/// Log an error with its code before it propagates to the entry point
pub fn log_error(context: &str, error: &TenantGuardError) {
    tracing::error!(
        context = context,
        code = error.code(),
        error = %error,
        "Tenant guard aborted startup"
    );
}
