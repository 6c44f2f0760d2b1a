// econdata-core/src/application/ingest.rs

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};

use crate::domain::bundle::RawBundle;
use crate::error::EconError;
use crate::ports::{Fetcher, RawStore};

#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub bundle_name: String,
    pub compress: bool,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedSource {
    pub name: String,
    pub bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub bundle_name: String,
    pub sources: Vec<FetchedSource>,
}

/// Fetches every source in order and stores them as one bundle.
///
/// The first failed fetch aborts the phase before anything is written, so a
/// previously stored bundle is never replaced by a partial one.
#[instrument(skip_all, fields(bundle = %options.bundle_name))]
pub async fn run_ingest(
    sources: &[(String, String)],
    fetcher: &dyn Fetcher,
    store: &dyn RawStore,
    options: &IngestOptions,
) -> Result<IngestReport, EconError> {
    let mut bundle = RawBundle::new();
    let mut fetched = Vec::with_capacity(sources.len());

    for (name, url) in sources {
        info!(source = %name, url = %url, "Fetching {}...", name);
        let text = fetcher.get_text(url, options.timeout).await?;
        info!(source = %name, bytes = text.len(), "Downloaded {} bytes", text.len());

        fetched.push(FetchedSource {
            name: name.clone(),
            bytes: text.len(),
        });
        bundle.insert(name.as_str(), text);
    }

    store
        .save(&options.bundle_name, &bundle, options.compress)
        .await?;

    Ok(IngestReport {
        bundle_name: options.bundle_name.clone(),
        sources: fetched,
    })
}
