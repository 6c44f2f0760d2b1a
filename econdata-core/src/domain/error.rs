// econdata-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

use crate::domain::compliance::AnomalyError;
use crate::domain::validation::ValidationError;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Source '{0}' is missing from the raw bundle")]
    #[diagnostic(
        code(econdata::domain::missing_source),
        help("Run the ingest phase before transforming (drop --transform-only).")
    )]
    MissingSource(String),

    #[error("Malformed data in {dataset}.{column} (row {row}): '{value}' {reason}")]
    #[diagnostic(code(econdata::domain::malformed_data))]
    MalformedData {
        dataset: String,
        column: String,
        row: usize,
        value: String,
        reason: String,
    },

    #[error("Validation failed for {dataset}: {source}")]
    #[diagnostic(
        code(econdata::domain::validation),
        help("The upstream file changed shape or content; inspect the raw bundle.")
    )]
    Validation {
        dataset: String,
        #[source]
        source: ValidationError,
    },

    #[error("Schema Error: {0}")]
    #[diagnostic(code(econdata::domain::schema))]
    SchemaError(String),

    #[error("Row count anomaly in {dataset}: {source}")]
    #[diagnostic(
        code(econdata::domain::row_count_anomaly),
        help("Set `strict: false` or raise `row_count_threshold` if the change is expected.")
    )]
    RowCountAnomaly {
        dataset: String,
        #[source]
        source: AnomalyError,
    },
}
