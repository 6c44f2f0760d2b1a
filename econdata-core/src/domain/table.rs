// econdata-core/src/domain/table.rs
//
// Minimal columnar table: ordered, named, typed columns of equal length.
// Dates are stored as Utf8 in `YYYY-MM-DD` or `YYYY-MM` form.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Utf8,
    Float64,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Utf8 => write!(f, "string"),
            ColumnType::Float64 => write!(f, "double"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Utf8(Vec<Option<String>>),
    Float64(Vec<Option<f64>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Utf8(v) => v.len(),
            ColumnData::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_type(&self) -> ColumnType {
        match self {
            ColumnData::Utf8(_) => ColumnType::Utf8,
            ColumnData::Float64(_) => ColumnType::Float64,
        }
    }

    pub fn is_null(&self, row: usize) -> bool {
        match self {
            ColumnData::Utf8(v) => v.get(row).is_none_or(|c| c.is_none()),
            ColumnData::Float64(v) => v.get(row).is_none_or(|c| c.is_none()),
        }
    }

    pub fn null_count(&self) -> usize {
        match self {
            ColumnData::Utf8(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Float64(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    /// Keeps the rows whose mask entry is `true`.
    pub fn filter(&self, mask: &[bool]) -> ColumnData {
        fn keep<T: Clone>(values: &[T], mask: &[bool]) -> Vec<T> {
            values
                .iter()
                .zip(mask)
                .filter(|(_, keep)| **keep)
                .map(|(v, _)| v.clone())
                .collect()
        }
        match self {
            ColumnData::Utf8(v) => ColumnData::Utf8(keep(v, mask)),
            ColumnData::Float64(v) => ColumnData::Float64(keep(v, mask)),
        }
    }

    /// Text rendering of one cell; `None` for null.
    pub fn render(&self, row: usize) -> Option<String> {
        match self {
            ColumnData::Utf8(v) => v.get(row).cloned().flatten(),
            ColumnData::Float64(v) => v.get(row).copied().flatten().map(|f| f.to_string()),
        }
    }

    pub fn as_utf8(&self) -> Option<&[Option<String>]> {
        match self {
            ColumnData::Utf8(v) => Some(v),
            ColumnData::Float64(_) => None,
        }
    }

    pub fn as_float64(&self) -> Option<&[Option<f64>]> {
        match self {
            ColumnData::Float64(v) => Some(v),
            ColumnData::Utf8(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn data_type(&self) -> ColumnType {
        self.data.data_type()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column. Rejects duplicate names and lengths that differ
    /// from the existing row count.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        data: ColumnData,
    ) -> Result<(), DomainError> {
        let name = name.into();
        if self.column(&name).is_some() {
            return Err(DomainError::SchemaError(format!(
                "duplicate column '{}'",
                name
            )));
        }
        if !self.columns.is_empty() && data.len() != self.num_rows() {
            return Err(DomainError::SchemaError(format!(
                "column '{}' has {} rows, table has {}",
                name,
                data.len(),
                self.num_rows()
            )));
        }
        self.columns.push(Column { name, data });
        Ok(())
    }

    pub fn with_column(
        mut self,
        name: impl Into<String>,
        data: ColumnData,
    ) -> Result<Self, DomainError> {
        self.push_column(name, data)?;
        Ok(self)
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data.len())
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn filter(&self, mask: &[bool]) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    data: c.data.filter(mask),
                })
                .collect(),
        }
    }
}
