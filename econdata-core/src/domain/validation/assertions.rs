// econdata-core/src/domain/validation/assertions.rs

use std::collections::BTreeSet;

use crate::domain::dates;
use crate::domain::table::{ColumnData, ColumnType, Table};
use crate::domain::validation::ValidationError;

/// Shared upper bound for year plausibility checks.
pub const MAX_PLAUSIBLE_YEAR: i32 = 2030;

/// Semantic checks layered on top of the structural contract.
/// Null cells are skipped by every value-level assertion.
#[derive(Debug, Clone, PartialEq)]
pub enum Assertion {
    /// Every value is a `YYYY-MM-DD` calendar date.
    ValidDate { column: String },
    /// Every value is a `YYYY-MM` month.
    ValidMonth { column: String },
    MaxLength { column: String, max: usize },
    /// Strictly greater than zero.
    Positive { column: String },
    /// Inclusive bounds.
    InRange { column: String, min: f64, max: f64 },
    InSet {
        column: String,
        allowed: BTreeSet<String>,
    },
    /// Smallest and largest year found in a date/month column stay in bounds.
    YearRange { column: String, min: i32, max: i32 },
    /// More than `min` non-null values.
    MinNonNull { column: String, min: usize },
}

impl Assertion {
    pub fn valid_date(column: &str) -> Self {
        Assertion::ValidDate {
            column: column.to_string(),
        }
    }

    pub fn valid_month(column: &str) -> Self {
        Assertion::ValidMonth {
            column: column.to_string(),
        }
    }

    pub fn max_length(column: &str, max: usize) -> Self {
        Assertion::MaxLength {
            column: column.to_string(),
            max,
        }
    }

    pub fn positive(column: &str) -> Self {
        Assertion::Positive {
            column: column.to_string(),
        }
    }

    pub fn in_range(column: &str, min: f64, max: f64) -> Self {
        Assertion::InRange {
            column: column.to_string(),
            min,
            max,
        }
    }

    pub fn in_set(column: &str, allowed: &[&str]) -> Self {
        Assertion::InSet {
            column: column.to_string(),
            allowed: allowed.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Year range with the shared upper bound.
    pub fn years_since(column: &str, min: i32) -> Self {
        Assertion::YearRange {
            column: column.to_string(),
            min,
            max: MAX_PLAUSIBLE_YEAR,
        }
    }

    pub fn min_non_null(column: &str, min: usize) -> Self {
        Assertion::MinNonNull {
            column: column.to_string(),
            min,
        }
    }

    pub fn check(&self, table: &Table) -> Result<(), ValidationError> {
        match self {
            Assertion::ValidDate { column } => {
                for value in utf8_values(table, column)? {
                    if !dates::is_valid_date(value) {
                        return Err(ValidationError::InvalidDate {
                            column: column.clone(),
                            value: value.to_string(),
                        });
                    }
                }
                Ok(())
            }
            Assertion::ValidMonth { column } => {
                for value in utf8_values(table, column)? {
                    if dates::parse_month(value).is_none() {
                        return Err(ValidationError::InvalidMonth {
                            column: column.clone(),
                            value: value.to_string(),
                        });
                    }
                }
                Ok(())
            }
            Assertion::MaxLength { column, max } => {
                for value in utf8_values(table, column)? {
                    if value.chars().count() > *max {
                        return Err(ValidationError::TooLong {
                            column: column.clone(),
                            value: value.to_string(),
                            max: *max,
                        });
                    }
                }
                Ok(())
            }
            Assertion::Positive { column } => {
                for value in float_values(table, column)? {
                    if value <= 0.0 || value.is_nan() {
                        return Err(ValidationError::NotPositive {
                            column: column.clone(),
                            value,
                        });
                    }
                }
                Ok(())
            }
            Assertion::InRange { column, min, max } => {
                for value in float_values(table, column)? {
                    if !(*min..=*max).contains(&value) {
                        return Err(ValidationError::OutOfRange {
                            column: column.clone(),
                            value,
                            min: *min,
                            max: *max,
                        });
                    }
                }
                Ok(())
            }
            Assertion::InSet { column, allowed } => {
                for value in utf8_values(table, column)? {
                    if !allowed.contains(value) {
                        return Err(ValidationError::NotInSet {
                            column: column.clone(),
                            value: value.to_string(),
                        });
                    }
                }
                Ok(())
            }
            Assertion::YearRange { column, min, max } => {
                let years: Vec<i32> = utf8_values(table, column)?
                    .filter_map(dates::leading_year)
                    .collect();
                let out_of_bounds = [years.iter().min(), years.iter().max()]
                    .into_iter()
                    .flatten()
                    .find(|year| **year < *min || **year > *max);
                match out_of_bounds {
                    Some(year) => Err(ValidationError::YearOutOfRange {
                        column: column.clone(),
                        year: *year,
                        min: *min,
                        max: *max,
                    }),
                    None => Ok(()),
                }
            }
            Assertion::MinNonNull { column, min } => {
                let data = present(table, column)?;
                let count = data.len() - data.null_count();
                if count <= *min {
                    return Err(ValidationError::TooFewNonNull {
                        column: column.clone(),
                        count,
                        min: *min,
                    });
                }
                Ok(())
            }
        }
    }
}

fn present<'a>(
    table: &'a Table,
    column: &str,
) -> Result<&'a ColumnData, ValidationError> {
    table
        .column(column)
        .map(|c| &c.data)
        .ok_or_else(|| ValidationError::MissingColumn {
            column: column.to_string(),
        })
}

fn utf8_values<'a>(
    table: &'a Table,
    column: &str,
) -> Result<impl Iterator<Item = &'a str>, ValidationError> {
    let data = present(table, column)?;
    let values = data.as_utf8().ok_or_else(|| ValidationError::TypeMismatch {
        column: column.to_string(),
        expected: ColumnType::Utf8,
        actual: data.data_type(),
    })?;
    Ok(values.iter().flatten().map(String::as_str))
}

fn float_values<'a>(
    table: &'a Table,
    column: &str,
) -> Result<impl Iterator<Item = f64> + 'a, ValidationError> {
    let data = present(table, column)?;
    let values = data
        .as_float64()
        .ok_or_else(|| ValidationError::TypeMismatch {
            column: column.to_string(),
            expected: ColumnType::Float64,
            actual: data.data_type(),
        })?;
    Ok(values.iter().flatten().copied())
}
