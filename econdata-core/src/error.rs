// econdata-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum EconError {
    // --- DOMAIN ERRORS (missing sources, malformed data, validation) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (HTTP, IO, parsing of config/bundles) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- GENERIC / APPLICATION ERRORS ---
    #[error("Internal Error: {0}")]
    #[diagnostic(code(econdata::internal))]
    InternalError(String),
}

// Shortcut so use cases can `?` on std::fs calls
impl From<std::io::Error> for EconError {
    fn from(err: std::io::Error) -> Self {
        EconError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl EconError {
    /// True for failures raised by the validation layer.
    pub fn is_validation(&self) -> bool {
        matches!(self, EconError::Domain(DomainError::Validation { .. }))
    }
}
