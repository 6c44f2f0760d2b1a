// econdata-core/src/infrastructure/config/project.rs

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::domain::datasets::{DEFAULT_BUNDLE_NAME, sources};
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["econdata.yaml", "econdata.yml"];

pub const ENV_PROJECT_DIR: &str = "ECONDATA_PROJECT_DIR";
pub const ENV_DATA_DIR: &str = "ECONDATA_DATA_DIR";
pub const ENV_BUNDLE_NAME: &str = "ECONDATA_BUNDLE_NAME";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "ECONDATA_HTTP_TIMEOUT_SECS";
pub const ENV_FAIL_FAST: &str = "ECONDATA_FAIL_FAST";

/// Run configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Root for raw bundles, published subsets and run state.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[validate(length(min = 1, message = "bundle_name cannot be empty"))]
    #[serde(default = "default_bundle_name")]
    pub bundle_name: String,

    /// Gzip the raw bundle.
    #[serde(default = "default_true")]
    pub compress: bool,

    #[validate(range(min = 1, message = "http_timeout_secs must be at least 1"))]
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Stop the transform phase at the first failing dataset.
    #[serde(default = "default_true")]
    pub fail_fast: bool,

    /// Row-count anomalies fail the dataset instead of warning.
    #[serde(default)]
    pub strict: bool,

    /// Tolerated relative change in row count between runs (0.2 = 20%).
    #[validate(range(min = 0.0, message = "row_count_threshold cannot be negative"))]
    #[serde(default)]
    pub row_count_threshold: Option<f64>,

    /// URL overrides keyed by logical source name.
    #[serde(default)]
    pub sources: BTreeMap<String, String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_bundle_name() -> String {
    DEFAULT_BUNDLE_NAME.to_string()
}

fn default_true() -> bool {
    true
}

fn default_http_timeout_secs() -> u64 {
    300
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            bundle_name: default_bundle_name(),
            compress: true,
            http_timeout_secs: default_http_timeout_secs(),
            fail_fast: true,
            strict: false,
            row_count_threshold: None,
            sources: BTreeMap::new(),
        }
    }
}

impl ProjectConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// The built-in sources in declared order, with configured URL overrides applied.
    pub fn source_urls(&self) -> Result<Vec<(String, String)>, InfrastructureError> {
        if let Some(unknown) = self
            .sources
            .keys()
            .find(|k| !sources::DEFAULTS.iter().any(|(name, _)| name == k))
        {
            return Err(InfrastructureError::ConfigError(format!(
                "unknown source '{}' (expected one of: {})",
                unknown,
                sources::DEFAULTS
                    .iter()
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        Ok(sources::DEFAULTS
            .iter()
            .map(|(name, url)| {
                let url = self.sources.get(*name).map(String::as_str).unwrap_or(*url);
                (name.to_string(), url.to_string())
            })
            .collect())
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.data_dir.join("raw")
    }

    pub fn subsets_dir(&self) -> PathBuf {
        self.data_dir.join("subsets")
    }

    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join("state.json")
    }

    pub fn run_results_path(&self) -> PathBuf {
        self.data_dir.join("run_results.json")
    }
}

/// Project directory: `ECONDATA_PROJECT_DIR` when set, else the working directory.
pub fn resolve_project_dir(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    lookup(ENV_PROJECT_DIR)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Loads the configuration of `project_dir`, with process environment overrides.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    load_config_with(project_dir, |key| std::env::var(key).ok())
}

/// Same as [`load_config`], reading overrides through `lookup`.
#[instrument(skip(project_dir, lookup))]
pub fn load_config_with(
    project_dir: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ProjectConfig, InfrastructureError> {
    let mut config = match find_config_file(project_dir) {
        Some(path) => {
            info!(path = ?path, "Loading project configuration");
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read configuration at {:?}", path))?;
            parse_config(&content)?
        }
        None => {
            debug!(dir = ?project_dir, "No configuration file, using defaults");
            ProjectConfig::default()
        }
    };

    apply_env_overrides(&mut config, lookup)?;

    if config.data_dir.is_relative() {
        config.data_dir = project_dir.join(&config.data_dir);
    }

    config
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;
    config.source_urls()?;

    Ok(config)
}

fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

fn parse_config(content: &str) -> Result<ProjectConfig, InfrastructureError> {
    // An empty file deserializes to null; treat it as "all defaults"
    if content.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

fn apply_env_overrides(
    config: &mut ProjectConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), InfrastructureError> {
    if let Some(val) = lookup(ENV_DATA_DIR) {
        info!(old = ?config.data_dir, new = ?val, "Overriding data dir via ENV");
        config.data_dir = PathBuf::from(val);
    }
    if let Some(val) = lookup(ENV_BUNDLE_NAME) {
        info!(old = ?config.bundle_name, new = ?val, "Overriding bundle name via ENV");
        config.bundle_name = val;
    }
    if let Some(val) = lookup(ENV_HTTP_TIMEOUT_SECS) {
        config.http_timeout_secs = val.trim().parse().map_err(|_| {
            InfrastructureError::ConfigError(format!(
                "{} must be a whole number of seconds, got '{}'",
                ENV_HTTP_TIMEOUT_SECS, val
            ))
        })?;
        info!(secs = config.http_timeout_secs, "Overriding HTTP timeout via ENV");
    }
    if let Some(val) = lookup(ENV_FAIL_FAST) {
        config.fail_fast = parse_flag(&val).ok_or_else(|| {
            InfrastructureError::ConfigError(format!(
                "{} must be true or false, got '{}'",
                ENV_FAIL_FAST, val
            ))
        })?;
        info!(fail_fast = config.fail_fast, "Overriding fail_fast via ENV");
    }
    Ok(())
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
