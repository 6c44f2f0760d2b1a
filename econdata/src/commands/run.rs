// econdata/src/commands/run.rs
//
// USE CASE: Run the ingest and/or transform phases.

use anyhow::Context;
use econdata_core::application::{PipelineContext, RunMode, run_pipeline};
use econdata_core::infrastructure::adapters::{FsRawStore, FsSink, ReqwestFetcher};
use econdata_core::infrastructure::config::{load_config, resolve_project_dir, validate_environment};

use super::summary;

pub async fn execute(mode: RunMode) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    tracing::debug!(?mode, "Starting run");

    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let project_dir = resolve_project_dir(|key| std::env::var(key).ok());
    let config = load_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Data dir: {}", config.data_dir.display());

    validate_environment(&config).context("Pre-flight checks failed")?;

    // B. Instantiate the adapters
    let fetcher = ReqwestFetcher::new().context("Failed to initialize the HTTP client")?;
    let store = FsRawStore::new(&config.data_dir);
    let sink = FsSink::new(&config.data_dir);

    // C. Run the Pipeline (Application Layer)
    let ctx = PipelineContext {
        config: &config,
        fetcher: &fetcher,
        store: &store,
        sink: &sink,
    };

    match run_pipeline(&ctx, mode).await {
        Ok(run_res) => {
            if let Some(ingest) = &run_res.ingest {
                println!("{}", summary::ingest_table(ingest));
            }
            if mode.transform {
                println!("{}", summary::publish_table(&run_res));
            }
            if run_res.success {
                println!("\n✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());
            } else {
                eprintln!("\n❌ FAILURE. {} dataset(s) failed.", run_res.errors.len());
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("\n💥 CRITICAL PIPELINE ERROR: {:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    }

    Ok(())
}
