// econdata-core/src/domain/compliance/anomaly.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AnomalyError {
    #[error(
        "Row count deviation too high: {deviation:.2}% (Threshold: {threshold:.2}%). Prev: {prev}, Curr: {curr}"
    )]
    DeviationExceeded {
        deviation: f64,
        threshold: f64,
        prev: u64,
        curr: u64,
    },
    #[error("No previous run recorded for this dataset.")]
    NoHistory,
}

/// Persisted between runs, one entry per published dataset.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct DatasetRunState {
    pub last_run_at: String,
    pub row_count: u64,
}

pub struct RowCountCheck;

impl RowCountCheck {
    /// Compares the new row count with the previous run.
    ///
    /// # Arguments
    /// * `current_count` - Rows in the table about to be published.
    /// * `previous_count` - Rows published last time, if any.
    /// * `threshold` - Tolerated relative change (ex: 0.05 for 5%).
    pub fn validate(
        current_count: u64,
        previous_count: Option<u64>,
        threshold: f64,
    ) -> Result<(), AnomalyError> {
        let prev = match previous_count {
            Some(p) if p > 0 => p,
            Some(_) => return Ok(()),
            None => return Err(AnomalyError::NoHistory),
        };

        let diff = current_count.abs_diff(prev);
        let ratio = diff as f64 / prev as f64;

        if ratio > threshold {
            return Err(AnomalyError::DeviationExceeded {
                deviation: ratio * 100.0,
                threshold: threshold * 100.0,
                prev,
                curr: current_count,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_deviation() {
        assert!(RowCountCheck::validate(2104, Some(2100), 0.05).is_ok());
    }

    #[test]
    fn test_shrinking_dataset_is_flagged() {
        let res = RowCountCheck::validate(900, Some(1000), 0.05);
        assert!(matches!(res, Err(AnomalyError::DeviationExceeded { prev: 1000, curr: 900, .. })));
    }

    #[test]
    fn test_growth_is_flagged() {
        let res = RowCountCheck::validate(1100, Some(1000), 0.05);
        assert!(matches!(res, Err(AnomalyError::DeviationExceeded { .. })));
    }

    #[test]
    fn test_first_run() {
        assert_eq!(RowCountCheck::validate(100, None, 0.05), Err(AnomalyError::NoHistory));
    }

    #[test]
    fn test_previous_zero_accepts_anything() {
        assert!(RowCountCheck::validate(5000, Some(0), 0.01).is_ok());
    }
}
