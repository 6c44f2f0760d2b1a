// econdata-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- HTTP ---
    #[error("Fetch of {url} failed: {message}")]
    #[diagnostic(
        code(econdata::infra::fetch),
        help("Check network access and the source URL.")
    )]
    Fetch { url: String, message: String },

    #[error("Fetch of {url} returned HTTP {status}")]
    #[diagnostic(code(econdata::infra::http_status))]
    HttpStatus { url: String, status: u16 },

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(econdata::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    #[error("Raw bundle '{0}' not found")]
    #[diagnostic(
        code(econdata::infra::bundle_missing),
        help("Run the ingest phase first (drop --transform-only).")
    )]
    BundleNotFound(String),

    // --- SERIALIZATION ---
    #[error("JSON Error: {0}")]
    #[diagnostic(code(econdata::infra::json))]
    Json(#[from] serde_json::Error),

    #[error("CSV Error: {0}")]
    #[diagnostic(code(econdata::infra::csv))]
    Csv(#[from] csv::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(econdata::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(econdata::infra::config))]
    ConfigError(String),

    #[error("Project configuration not found at '{0}'")]
    #[diagnostic(code(econdata::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Environment check failed: {0}")]
    #[diagnostic(code(econdata::infra::environment))]
    Environment(String),

    // Errors carrying anyhow context from the loaders
    #[error(transparent)]
    #[diagnostic(code(econdata::infra::other))]
    Other(#[from] anyhow::Error),
}
