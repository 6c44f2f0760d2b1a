// econdata-core/src/ports/sink.rs

use async_trait::async_trait;

use crate::domain::metadata::DatasetMetadata;
use crate::domain::table::Table;
use crate::error::EconError;

/// Downstream destination for validated datasets.
#[async_trait]
pub trait Sink: Send + Sync {
    async fn upload_data(&self, table: &Table, dataset_id: &str) -> Result<(), EconError>;

    async fn publish(&self, dataset_id: &str, metadata: &DatasetMetadata) -> Result<(), EconError>;
}
