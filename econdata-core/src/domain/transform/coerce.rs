// econdata-core/src/domain/transform/coerce.rs

use crate::domain::dates;
use crate::domain::table::{ColumnData, ColumnType};

/// Source date spelling for a `Date` output column. Output is always `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// Already `YYYY-MM-DD`; re-emitted in canonical form.
    Iso,
    /// `M/D/YYYY`, possibly quoted.
    MonthDayYear,
}

/// Declared type of an output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Float,
    Date(DateLayout),
}

impl ColumnKind {
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnKind::Float => ColumnType::Float64,
            ColumnKind::Text | ColumnKind::Date(_) => ColumnType::Utf8,
        }
    }
}

/// A cell that could not be coerced: index of the row, offending value, reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionFailure {
    pub row: usize,
    pub value: String,
    pub reason: String,
}

/// Casts a text column to `kind`. Empty, blank and quote-wrapped empty cells
/// become null; anything else that does not parse is a failure.
pub fn coerce(values: &[Option<String>], kind: ColumnKind) -> Result<ColumnData, CoercionFailure> {
    match kind {
        ColumnKind::Text => Ok(ColumnData::Utf8(
            values
                .iter()
                .map(|v| v.as_ref().filter(|s| !is_blank(s)).cloned())
                .collect(),
        )),
        ColumnKind::Float => values
            .iter()
            .enumerate()
            .map(|(row, v)| match non_blank(v) {
                None => Ok(None),
                Some(s) => s.parse::<f64>().map(Some).map_err(|_| CoercionFailure {
                    row,
                    value: s.to_string(),
                    reason: "is not a number".to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ColumnData::Float64),
        ColumnKind::Date(layout) => values
            .iter()
            .enumerate()
            .map(|(row, v)| match non_blank(v) {
                None => Ok(None),
                Some(s) => {
                    let parsed = match layout {
                        DateLayout::Iso => dates::reformat_iso_date(s),
                        DateLayout::MonthDayYear => dates::month_day_year_to_iso(s),
                    };
                    parsed.map(Some).map_err(|reason| CoercionFailure {
                        row,
                        value: s.to_string(),
                        reason,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ColumnData::Utf8),
    }
}

fn is_blank(value: &str) -> bool {
    dates::strip_quotes(value).is_empty()
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(dates::strip_quotes)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cells(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_float_blank_and_quoted_become_null() {
        let data = coerce(&cells(&[Some("3.73"), Some(""), Some("  "), Some("\"\""), None]), ColumnKind::Float)
            .unwrap();
        assert_eq!(data, ColumnData::Float64(vec![Some(3.73), None, None, None, None]));
    }

    #[test]
    fn test_float_quoted_value_parses() {
        let data = coerce(&cells(&[Some(" \"0.6\" ")]), ColumnKind::Float).unwrap();
        assert_eq!(data, ColumnData::Float64(vec![Some(0.6)]));
    }

    #[test]
    fn test_malformed_float_is_an_error() {
        let err = coerce(&cells(&[Some("1.0"), Some("abc")]), ColumnKind::Float).unwrap_err();
        assert_eq!(err.row, 1);
        assert_eq!(err.value, "abc");
    }

    #[test]
    fn test_text_keeps_value_nulls_blank() {
        let data = coerce(&cells(&[Some("Argentina"), Some(""), None]), ColumnKind::Text).unwrap();
        assert_eq!(data, ColumnData::Utf8(vec![Some("Argentina".into()), None, None]));
    }

    #[test]
    fn test_dates() {
        let us = coerce(&cells(&[Some("1/2/2015"), Some("")]), ColumnKind::Date(DateLayout::MonthDayYear))
            .unwrap();
        assert_eq!(us, ColumnData::Utf8(vec![Some("2015-01-02".into()), None]));

        let iso = coerce(&cells(&[Some("2000-04-01")]), ColumnKind::Date(DateLayout::Iso)).unwrap();
        assert_eq!(iso, ColumnData::Utf8(vec![Some("2000-04-01".into())]));

        let err = coerce(&cells(&[Some("2015/01")]), ColumnKind::Date(DateLayout::MonthDayYear))
            .unwrap_err();
        assert_eq!(err.row, 0);
        assert!(err.reason.contains("part"));
    }
}
