// econdata-core/src/application/pipeline.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{error, info, instrument, warn};

use crate::application::ingest::{IngestOptions, IngestReport, run_ingest};
use crate::application::publish::{PublishContext, PublishedDataset, transform_and_publish};
use crate::domain::compliance::DatasetRunState;
use crate::domain::datasets;
use crate::error::EconError;
use crate::infrastructure::config::ProjectConfig;
use crate::ports::{Fetcher, RawStore, Sink};

/// Which phases a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunMode {
    pub ingest: bool,
    pub transform: bool,
}

impl RunMode {
    /// Each "only" flag disables the other phase; setting both disables both.
    pub fn from_flags(ingest_only: bool, transform_only: bool) -> Self {
        Self {
            ingest: !transform_only,
            transform: !ingest_only,
        }
    }
}

impl Default for RunMode {
    fn default() -> Self {
        Self::from_flags(false, false)
    }
}

/// Collaborators and settings for one run.
pub struct PipelineContext<'a> {
    pub config: &'a ProjectConfig,
    pub fetcher: &'a dyn Fetcher,
    pub store: &'a dyn RawStore,
    pub sink: &'a dyn Sink,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunResult {
    pub success: bool,
    pub datasets_published: usize,
    pub errors: Vec<String>,
    #[serde(default)]
    pub published: Vec<PublishedDataset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingest: Option<IngestReport>,
}

type StateStore = BTreeMap<String, DatasetRunState>;

/// Runs ingest then transform, as selected by `mode`.
///
/// Ingest failures abort the run with an error. Transform failures are
/// recorded in the returned result (and in `run_results.json`); with
/// `fail_fast` the remaining datasets are skipped.
#[instrument(skip_all, fields(ingest = mode.ingest, transform = mode.transform))]
pub async fn run_pipeline(
    ctx: &PipelineContext<'_>,
    mode: RunMode,
) -> Result<RunResult, EconError> {
    let config = ctx.config;
    let mut result = RunResult {
        success: true,
        ..RunResult::default()
    };

    if !mode.ingest && !mode.transform {
        warn!("Both phases disabled, nothing to do");
        return Ok(result);
    }

    if mode.ingest {
        println!("📥 Ingesting sources...");
        let options = IngestOptions {
            bundle_name: config.bundle_name.clone(),
            compress: config.compress,
            timeout: config.http_timeout(),
        };
        let report = run_ingest(&config.source_urls()?, ctx.fetcher, ctx.store, &options).await?;
        println!(
            "   ✅ Stored bundle '{}' ({} sources)",
            report.bundle_name,
            report.sources.len()
        );
        result.ingest = Some(report);
    }

    if mode.transform {
        run_transform(ctx, &mut result).await?;
    }

    Ok(result)
}

async fn run_transform(ctx: &PipelineContext<'_>, result: &mut RunResult) -> Result<(), EconError> {
    let config = ctx.config;
    println!("🔄 Transforming datasets...");

    let bundle = ctx.store.load(&config.bundle_name).await?;
    let recipes = datasets::all()?;

    let state_path = config.state_path();
    let mut state = load_state_store(&state_path);

    for recipe in &recipes {
        let publish_ctx = PublishContext {
            sink: ctx.sink,
            prev_row_count: state.get(&recipe.id).map(|s| s.row_count),
            row_count_threshold: config.row_count_threshold,
            strict: config.strict,
        };

        match transform_and_publish(recipe, &bundle, &publish_ctx).await {
            Ok(published) => {
                println!("   ✅ Published {} ({} rows)", published.dataset_id, published.rows);
                state.insert(
                    recipe.id.clone(),
                    DatasetRunState {
                        last_run_at: chrono::Utc::now().to_rfc3339(),
                        row_count: published.rows,
                    },
                );
                save_json(&state_path, &state)?;
                result.published.push(published);
            }
            Err(e) => {
                error!(dataset = %recipe.id, error = %e, "Dataset failed");
                eprintln!("   ❌ {}: {}", recipe.id, e);
                result.errors.push(format!("{}: {}", recipe.id, e));
                if config.fail_fast {
                    break;
                }
            }
        }
    }

    result.datasets_published = result.published.len();
    result.success = result.errors.is_empty();
    save_json(&config.run_results_path(), &*result)?;

    info!(
        published = result.datasets_published,
        failed = result.errors.len(),
        "Transform phase finished"
    );
    Ok(())
}

fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), EconError> {
    let content = serde_json::to_string_pretty(data)
        .map_err(|e| EconError::InternalError(format!("Serialization: {}", e)))?;
    crate::infrastructure::fs::atomic_write(path, content)?;
    Ok(())
}

/// Missing or unreadable state means no history.
fn load_state_store(path: &Path) -> StateStore {
    if !path.exists() {
        return StateStore::new();
    }
    match fs::read_to_string(path).map(|c| serde_json::from_str(&c)) {
        Ok(Ok(store)) => store,
        Ok(Err(e)) => {
            warn!(path = ?path, error = %e, "Ignoring corrupt state file");
            StateStore::new()
        }
        Err(e) => {
            warn!(path = ?path, error = %e, "Ignoring unreadable state file");
            StateStore::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        MemoryStore, MockFetcher, MockSink, big_mac_csv, house_price_csv, pmms_csv, valid_bundle,
    };
    use crate::domain::bundle::RawBundle;
    use crate::domain::datasets::sources;
    use crate::infrastructure::error::InfrastructureError;
    use tempfile::{TempDir, tempdir};

    const ALL_IDS: [&str; 3] = [
        "big_mac_index",
        "freddie_mac_house_price_index",
        "freddie_mac_mortgage_rates",
    ];

    fn config(dir: &TempDir) -> ProjectConfig {
        ProjectConfig {
            data_dir: dir.path().to_path_buf(),
            ..ProjectConfig::default()
        }
    }

    fn transform_only() -> RunMode {
        RunMode::from_flags(false, true)
    }

    fn read_results(config: &ProjectConfig) -> RunResult {
        serde_json::from_str(&fs::read_to_string(config.run_results_path()).unwrap()).unwrap()
    }

    #[test]
    fn test_mode_from_flags() {
        assert_eq!(RunMode::from_flags(false, false), RunMode { ingest: true, transform: true });
        assert_eq!(RunMode::from_flags(true, false), RunMode { ingest: true, transform: false });
        assert_eq!(RunMode::from_flags(false, true), RunMode { ingest: false, transform: true });
        assert_eq!(RunMode::from_flags(true, true), RunMode { ingest: false, transform: false });
    }

    #[tokio::test]
    async fn test_full_run_fetches_then_publishes_in_order() {
        let dir = tempdir().unwrap();
        let config = config(&dir);
        let bundle = valid_bundle();
        let mut fetcher = MockFetcher::default();
        for (name, url) in sources::DEFAULTS {
            fetcher = fetcher.with_body(url, bundle.require(name).unwrap());
        }
        let store = MemoryStore::default();
        let sink = MockSink::default();
        let ctx = PipelineContext {
            config: &config,
            fetcher: &fetcher,
            store: &store,
            sink: &sink,
        };

        let result = run_pipeline(&ctx, RunMode::default()).await.unwrap();

        assert!(result.success);
        assert_eq!(result.datasets_published, 3);
        assert_eq!(result.ingest.unwrap().sources.len(), 3);
        assert_eq!(*sink.published.lock().unwrap(), ALL_IDS);

        let state: StateStore =
            serde_json::from_str(&fs::read_to_string(config.state_path()).unwrap()).unwrap();
        assert_eq!(state["big_mac_index"].row_count, 120);
        assert_eq!(state["freddie_mac_house_price_index"].row_count, 10_000);
        assert!(read_results(&config).success);
    }

    #[tokio::test]
    async fn test_ingest_only_leaves_sink_untouched() {
        let dir = tempdir().unwrap();
        let config = config(&dir);
        let mut fetcher = MockFetcher::default();
        for (_, url) in sources::DEFAULTS {
            fetcher = fetcher.with_body(url, "x\n");
        }
        let store = MemoryStore::default();
        let sink = MockSink::default();
        let ctx = PipelineContext {
            config: &config,
            fetcher: &fetcher,
            store: &store,
            sink: &sink,
        };

        let result = run_pipeline(&ctx, RunMode::from_flags(true, false)).await.unwrap();

        assert!(result.success);
        assert_eq!(store.saved.lock().unwrap().len(), 1);
        assert!(sink.uploads.lock().unwrap().is_empty());
        assert!(!config.run_results_path().exists());
    }

    #[tokio::test]
    async fn test_fail_fast_stops_after_first_failure() {
        let dir = tempdir().unwrap();
        let config = config(&dir);
        let bundle: RawBundle = [
            (sources::BIG_MAC, big_mac_csv(10)),
            (sources::FREDDIE_MAC, house_price_csv(10_000)),
            (sources::PMMS, pmms_csv(2_100)),
        ]
        .into_iter()
        .collect();
        let store = MemoryStore::holding("data_sources", bundle);
        let sink = MockSink::default();
        let fetcher = MockFetcher::default();
        let ctx = PipelineContext {
            config: &config,
            fetcher: &fetcher,
            store: &store,
            sink: &sink,
        };

        let result = run_pipeline(&ctx, transform_only()).await.unwrap();

        assert!(!result.success);
        assert_eq!(result.datasets_published, 0);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("big_mac_index: "));
        assert!(sink.published.lock().unwrap().is_empty());
        assert!(fetcher.calls.lock().unwrap().is_empty());

        let saved = read_results(&config);
        assert!(!saved.success);
        assert_eq!(saved.errors, result.errors);
    }

    #[tokio::test]
    async fn test_continue_on_failure_publishes_the_rest() {
        let dir = tempdir().unwrap();
        let config = ProjectConfig {
            fail_fast: false,
            ..config(&dir)
        };
        let bundle: RawBundle = [
            (sources::FREDDIE_MAC, house_price_csv(10_000)),
            (sources::PMMS, pmms_csv(2_100)),
        ]
        .into_iter()
        .collect();
        let store = MemoryStore::holding("data_sources", bundle);
        let sink = MockSink::default();
        let ctx = PipelineContext {
            config: &config,
            fetcher: &MockFetcher::default(),
            store: &store,
            sink: &sink,
        };

        let result = run_pipeline(&ctx, transform_only()).await.unwrap();

        assert!(!result.success);
        assert_eq!(result.datasets_published, 2);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("missing from the raw bundle"));
        assert_eq!(*sink.published.lock().unwrap(), &ALL_IDS[1..]);
    }

    #[tokio::test]
    async fn test_missing_bundle_is_an_error() {
        let dir = tempdir().unwrap();
        let config = config(&dir);
        let store = MemoryStore::default();
        let ctx = PipelineContext {
            config: &config,
            fetcher: &MockFetcher::default(),
            store: &store,
            sink: &MockSink::default(),
        };

        let err = run_pipeline(&ctx, transform_only()).await.unwrap_err();
        assert!(matches!(
            err,
            EconError::Infrastructure(InfrastructureError::BundleNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_strict_row_count_anomaly_blocks_publish() {
        let dir = tempdir().unwrap();
        let config = ProjectConfig {
            strict: true,
            row_count_threshold: Some(0.1),
            ..config(&dir)
        };
        let history: StateStore = [(
            "big_mac_index".to_string(),
            DatasetRunState {
                last_run_at: "2026-01-01T00:00:00+00:00".into(),
                row_count: 500,
            },
        )]
        .into_iter()
        .collect();
        save_json(&config.state_path(), &history).unwrap();

        let store = MemoryStore::holding("data_sources", valid_bundle());
        let sink = MockSink::default();
        let ctx = PipelineContext {
            config: &config,
            fetcher: &MockFetcher::default(),
            store: &store,
            sink: &sink,
        };

        let result = run_pipeline(&ctx, transform_only()).await.unwrap();

        assert!(!result.success);
        assert!(result.errors[0].contains("Row count anomaly"));
        assert!(sink.uploads.lock().unwrap().is_empty());
        // Untouched history for the blocked dataset
        let state: StateStore =
            serde_json::from_str(&fs::read_to_string(config.state_path()).unwrap()).unwrap();
        assert_eq!(state["big_mac_index"].row_count, 500);
    }

    #[tokio::test]
    async fn test_corrupt_state_is_ignored() {
        let dir = tempdir().unwrap();
        let config = ProjectConfig {
            strict: true,
            row_count_threshold: Some(0.01),
            ..config(&dir)
        };
        fs::write(config.state_path(), "{ not json").unwrap();
        let store = MemoryStore::holding("data_sources", valid_bundle());
        let ctx = PipelineContext {
            config: &config,
            fetcher: &MockFetcher::default(),
            store: &store,
            sink: &MockSink::default(),
        };

        let result = run_pipeline(&ctx, transform_only()).await.unwrap();
        assert!(result.success, "{:?}", result.errors);
    }
}
