// econdata-core/src/domain/validation/mod.rs
//
// Declarative table contract checked before a dataset is published.

pub mod assertions;

use thiserror::Error;

use crate::domain::table::{ColumnType, Table};

pub use assertions::{Assertion, MAX_PLAUSIBLE_YEAR};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("[columns] missing column '{column}'")]
    MissingColumn { column: String },

    #[error("[columns] column '{column}' is {actual}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        actual: ColumnType,
    },

    #[error("[not_null] column '{column}' has {count} null value(s)")]
    NullValues { column: String, count: usize },

    #[error("[min_rows] table has {actual} rows, expected at least {min}")]
    TooFewRows { actual: usize, min: usize },

    #[error("[valid_date] column '{column}' has invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { column: String, value: String },

    #[error("[valid_month] column '{column}' has invalid month '{value}' (expected YYYY-MM)")]
    InvalidMonth { column: String, value: String },

    #[error("[max_length] column '{column}' value '{value}' exceeds {max} characters")]
    TooLong {
        column: String,
        value: String,
        max: usize,
    },

    #[error("[positive] column '{column}' has non-positive value {value}")]
    NotPositive { column: String, value: f64 },

    #[error("[in_range] column '{column}' value {value} outside [{min}, {max}]")]
    OutOfRange {
        column: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("[in_set] column '{column}' has unexpected value '{value}'")]
    NotInSet { column: String, value: String },

    #[error("[year_range] column '{column}' has year {year} outside [{min}, {max}]")]
    YearOutOfRange {
        column: String,
        year: i32,
        min: i32,
        max: i32,
    },

    #[error("[min_non_null] column '{column}' has {count} non-null value(s), expected more than {min}")]
    TooFewNonNull {
        column: String,
        count: usize,
        min: usize,
    },
}

impl ValidationError {
    /// Name of the violated rule.
    pub fn rule(&self) -> &'static str {
        match self {
            ValidationError::MissingColumn { .. } | ValidationError::TypeMismatch { .. } => {
                "columns"
            }
            ValidationError::NullValues { .. } => "not_null",
            ValidationError::TooFewRows { .. } => "min_rows",
            ValidationError::InvalidDate { .. } => "valid_date",
            ValidationError::InvalidMonth { .. } => "valid_month",
            ValidationError::TooLong { .. } => "max_length",
            ValidationError::NotPositive { .. } => "positive",
            ValidationError::OutOfRange { .. } => "in_range",
            ValidationError::NotInSet { .. } => "in_set",
            ValidationError::YearOutOfRange { .. } => "year_range",
            ValidationError::TooFewNonNull { .. } => "min_non_null",
        }
    }

    /// Column the rule failed on; `None` for table-level rules.
    pub fn column(&self) -> Option<&str> {
        match self {
            ValidationError::TooFewRows { .. } => None,
            ValidationError::MissingColumn { column }
            | ValidationError::TypeMismatch { column, .. }
            | ValidationError::NullValues { column, .. }
            | ValidationError::InvalidDate { column, .. }
            | ValidationError::InvalidMonth { column, .. }
            | ValidationError::TooLong { column, .. }
            | ValidationError::NotPositive { column, .. }
            | ValidationError::OutOfRange { column, .. }
            | ValidationError::NotInSet { column, .. }
            | ValidationError::YearOutOfRange { column, .. }
            | ValidationError::TooFewNonNull { column, .. } => Some(column),
        }
    }
}

/// Structural rules plus dataset-specific assertions.
#[derive(Debug, Clone, Default)]
pub struct ValidationSpec {
    pub columns: Vec<(String, ColumnType)>,
    pub not_null: Vec<String>,
    pub min_rows: usize,
    pub assertions: Vec<Assertion>,
}

impl ValidationSpec {
    pub fn new(min_rows: usize) -> Self {
        Self {
            min_rows,
            ..Self::default()
        }
    }

    pub fn column(mut self, name: &str, column_type: ColumnType) -> Self {
        self.columns.push((name.to_string(), column_type));
        self
    }

    pub fn not_null(mut self, columns: &[&str]) -> Self {
        self.not_null.extend(columns.iter().map(|c| c.to_string()));
        self
    }

    pub fn assert(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }
}

/// Checks `table` against `spec`, stopping at the first violated rule.
///
/// Order: declared columns and types, `not_null`, `min_rows`, then the
/// assertions in declaration order. Columns not named in the spec are ignored.
pub fn validate(table: &Table, spec: &ValidationSpec) -> Result<(), ValidationError> {
    for (name, expected) in &spec.columns {
        let column = table
            .column(name)
            .ok_or_else(|| ValidationError::MissingColumn {
                column: name.clone(),
            })?;
        let actual = column.data_type();
        if actual != *expected {
            return Err(ValidationError::TypeMismatch {
                column: name.clone(),
                expected: *expected,
                actual,
            });
        }
    }

    for name in &spec.not_null {
        let column = table
            .column(name)
            .ok_or_else(|| ValidationError::MissingColumn {
                column: name.clone(),
            })?;
        let count = column.data.null_count();
        if count > 0 {
            return Err(ValidationError::NullValues {
                column: name.clone(),
                count,
            });
        }
    }

    if table.num_rows() < spec.min_rows {
        return Err(ValidationError::TooFewRows {
            actual: table.num_rows(),
            min: spec.min_rows,
        });
    }

    for assertion in &spec.assertions {
        assertion.check(table)?;
    }

    Ok(())
}
