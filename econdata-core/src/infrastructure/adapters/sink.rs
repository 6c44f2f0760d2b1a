// econdata-core/src/infrastructure/adapters/sink.rs

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::metadata::DatasetMetadata;
use crate::domain::table::Table;
use crate::error::EconError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;
use crate::ports::sink::Sink;

/// Publishes datasets as files under `<data_dir>/subsets/`.
pub struct FsSink {
    dir: PathBuf,
}

impl FsSink {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: data_dir.as_ref().join("subsets"),
        }
    }

    pub fn data_path(&self, dataset_id: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", dataset_id))
    }

    pub fn metadata_path(&self, dataset_id: &str) -> PathBuf {
        self.dir.join(format!("{}.metadata.json", dataset_id))
    }
}

/// Header row then one record per row; nulls are empty fields.
fn render_csv(table: &Table) -> Result<Vec<u8>, InfrastructureError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.column_names())?;
    for row in 0..table.num_rows() {
        writer.write_record(
            table
                .columns()
                .iter()
                .map(|c| c.data.render(row).unwrap_or_default()),
        )?;
    }
    writer
        .into_inner()
        .map_err(|e| InfrastructureError::Io(e.into_error()))
}

#[async_trait]
impl Sink for FsSink {
    #[instrument(skip(self, table), fields(rows = table.num_rows()))]
    async fn upload_data(&self, table: &Table, dataset_id: &str) -> Result<(), EconError> {
        let path = self.data_path(dataset_id);
        atomic_write(&path, render_csv(table)?)?;
        info!(path = ?path, "Dataset uploaded");
        Ok(())
    }

    #[instrument(skip(self, metadata))]
    async fn publish(&self, dataset_id: &str, metadata: &DatasetMetadata) -> Result<(), EconError> {
        let path = self.metadata_path(dataset_id);
        let json = serde_json::to_string_pretty(metadata).map_err(InfrastructureError::from)?;
        atomic_write(&path, json)?;
        info!(path = ?path, "Dataset published");
        Ok(())
    }
}
