// econdata-core/src/infrastructure/config/environment.rs
//
// Pre-flight checks run once before any phase.

use std::fs;
use tracing::{debug, instrument};

use crate::infrastructure::config::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

#[instrument(skip_all)]
pub fn validate_environment(config: &ProjectConfig) -> Result<(), InfrastructureError> {
    if config.http_timeout_secs == 0 {
        return Err(InfrastructureError::Environment(
            "HTTP timeout must be greater than zero".into(),
        ));
    }

    for (name, url) in config.source_urls()? {
        check_url(&name, &url)?;
    }

    fs::create_dir_all(&config.data_dir).map_err(|e| {
        InfrastructureError::Environment(format!(
            "data directory {:?} cannot be created: {}",
            config.data_dir, e
        ))
    })?;
    // Dropped on return, which removes the probe
    tempfile::NamedTempFile::new_in(&config.data_dir).map_err(|e| {
        InfrastructureError::Environment(format!(
            "data directory {:?} is not writable: {}",
            config.data_dir, e
        ))
    })?;

    debug!(data_dir = ?config.data_dir, "Environment OK");
    Ok(())
}

fn check_url(name: &str, url: &str) -> Result<(), InfrastructureError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| {
        InfrastructureError::Environment(format!("source '{}' has an invalid URL '{}': {}", name, url, e))
    })?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(InfrastructureError::Environment(format!(
            "source '{}' must use an http(s) URL, got '{}'",
            name, url
        )));
    }
    Ok(())
}
