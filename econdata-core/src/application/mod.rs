// econdata-core/src/application/mod.rs

pub mod ingest;
pub mod pipeline;
pub mod publish;

#[cfg(test)]
pub(crate) mod test_support;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI do `use econdata_core::application::{run_pipeline, RunMode};`

pub use ingest::{IngestOptions, IngestReport, run_ingest};
pub use pipeline::{PipelineContext, RunMode, RunResult, run_pipeline};
pub use publish::{PublishContext, PublishedDataset, transform_and_publish};
