//! Diagnostic classification and emission
//!
//! Fatal findings abort startup; advisories are written to the log and
//! never block.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, warn};

use crate::error::{Advisory, ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fatal,
    Advisory,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fatal => write!(f, "fatal"),
            Severity::Advisory => write!(f, "advisory"),
        }
    }
}

/// A single finding produced by a validation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    Fatal(ConfigError),
    Advisory(Advisory),
}

impl Diagnostic {
    /// Wrap a violation at the severity chosen by policy
    pub fn at(severity: Severity, err: ConfigError) -> Self {
        match severity {
            Severity::Fatal => Diagnostic::Fatal(err),
            Severity::Advisory => Diagnostic::Advisory(Advisory::Downgraded(err)),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::Fatal(_) => Severity::Fatal,
            Diagnostic::Advisory(_) => Severity::Advisory,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Diagnostic::Fatal(err) => err.code(),
            Diagnostic::Advisory(advisory) => advisory.code(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Fatal(err) => write!(f, "{err}"),
            Diagnostic::Advisory(advisory) => write!(f, "{advisory}"),
        }
    }
}

/// Lifecycle of one validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationState {
    #[default]
    Unvalidated,
    Validating,
    Valid,
    Fatal,
}

/// Every diagnostic of one validation run, in check order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn fatal(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::Fatal(err) => Some(err),
            Diagnostic::Advisory(_) => None,
        })
    }

    pub fn advisories(&self) -> impl Iterator<Item = &Advisory> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::Advisory(advisory) => Some(advisory),
            Diagnostic::Fatal(_) => None,
        })
    }

    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    /// Terminal state of the run
    pub fn state(&self) -> ValidationState {
        if self.is_valid() {
            ValidationState::Valid
        } else {
            ValidationState::Fatal
        }
    }

    /// First fatal violation, if any
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] in check order.
    pub fn into_result(self) -> Result<(), ConfigError> {
        self.diagnostics
            .into_iter()
            .find_map(|d| match d {
                Diagnostic::Fatal(err) => Some(err),
                Diagnostic::Advisory(_) => None,
            })
            .map_or(Ok(()), Err)
    }
}

/// Emits diagnostics on the operator log and decides the outcome
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticReporter;

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self
    }

    /// Log every diagnostic, then fail with the first fatal one
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`ConfigError`] in `diagnostics`.
    pub fn report(&self, diagnostics: &[Diagnostic]) -> Result<(), ConfigError> {
        let mut first_fatal: Option<&ConfigError> = None;

        for diagnostic in diagnostics {
            match diagnostic {
                Diagnostic::Advisory(advisory) => {
                    warn!(code = advisory.code(), severity = %Severity::Advisory, "{}", advisory);
                }
                Diagnostic::Fatal(err) => {
                    error!(
                        code = err.code(),
                        key = err.key(),
                        severity = %Severity::Fatal,
                        "{}",
                        err
                    );
                    if first_fatal.is_none() {
                        first_fatal = Some(err);
                    }
                }
            }
        }

        match first_fatal {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
