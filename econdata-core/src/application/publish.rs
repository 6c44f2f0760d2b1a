// econdata-core/src/application/publish.rs

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::domain::bundle::RawBundle;
use crate::domain::compliance::{AnomalyError, RowCountCheck};
use crate::domain::error::DomainError;
use crate::domain::transform::TransformRecipe;
use crate::domain::validation::validate;
use crate::error::EconError;
use crate::ports::Sink;

/// Per-dataset inputs that come from configuration and run history.
pub struct PublishContext<'a> {
    pub sink: &'a dyn Sink,
    pub prev_row_count: Option<u64>,
    pub row_count_threshold: Option<f64>,
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedDataset {
    pub dataset_id: String,
    pub rows: u64,
    pub rows_dropped: usize,
}

/// Transform -> Validate -> Row-count check -> Upload -> Publish.
///
/// Nothing reaches the sink unless the table passed validation.
#[instrument(skip_all, fields(dataset = %recipe.id))]
pub async fn transform_and_publish(
    recipe: &TransformRecipe,
    bundle: &RawBundle,
    ctx: &PublishContext<'_>,
) -> Result<PublishedDataset, EconError> {
    let output = recipe.apply(bundle)?;

    validate(&output.table, &recipe.validation_spec()).map_err(|source| {
        DomainError::Validation {
            dataset: recipe.id.clone(),
            source,
        }
    })?;

    let rows = output.table.num_rows() as u64;
    check_row_count(
        &recipe.id,
        rows,
        ctx.prev_row_count,
        ctx.row_count_threshold,
        ctx.strict,
    )?;

    ctx.sink.upload_data(&output.table, &recipe.id).await?;
    ctx.sink.publish(&recipe.id, &output.metadata).await?;
    info!(rows, dropped = output.rows_dropped, "Published {}", recipe.id);

    Ok(PublishedDataset {
        dataset_id: recipe.id.clone(),
        rows,
        rows_dropped: output.rows_dropped,
    })
}

/// Compares with the last published row count. Only enforced when a threshold
/// is configured; outside strict mode a deviation is logged and tolerated.
fn check_row_count(
    dataset: &str,
    current: u64,
    previous: Option<u64>,
    threshold: Option<f64>,
    strict: bool,
) -> Result<(), DomainError> {
    let Some(threshold) = threshold else {
        return Ok(());
    };

    match RowCountCheck::validate(current, previous, threshold) {
        Ok(()) => Ok(()),
        Err(AnomalyError::NoHistory) => {
            debug!(dataset, "First run, no row count history");
            Ok(())
        }
        Err(source @ AnomalyError::DeviationExceeded { .. }) => {
            if strict {
                Err(DomainError::RowCountAnomaly {
                    dataset: dataset.to_string(),
                    source,
                })
            } else {
                warn!(dataset, "{} (strict mode off)", source);
                Ok(())
            }
        }
    }
}
