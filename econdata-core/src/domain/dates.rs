// econdata-core/src/domain/dates.rs
//
// Canonical date strings: `YYYY-MM-DD` for days, `YYYY-MM` for months.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn re_month() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{2})$").unwrap_or_else(|_| {
            // Hardcoded pattern, cannot fail
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

/// `"{year}-{month padded to 2 digits}"`. Longer month strings are kept as-is.
pub fn compose_month(year: &str, month: &str) -> String {
    format!("{}-{:0>2}", year.trim(), month.trim())
}

/// Inverse of [`compose_month`] for well-formed input.
pub fn parse_month(value: &str) -> Option<(i32, u32)> {
    let caps = re_month().captures(value)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

/// True when `value` is a real calendar day written as `YYYY-MM-DD`.
pub fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string() == value)
        .unwrap_or(false)
}

/// Re-emits an ISO calendar date in canonical zero-padded form.
pub fn reformat_iso_date(value: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|e| format!("is not a YYYY-MM-DD date ({})", e))
}

/// `M/D/YYYY` (optionally quoted or padded with whitespace) to `YYYY-MM-DD`.
pub fn month_day_year_to_iso(value: &str) -> Result<String, String> {
    let cleaned = strip_quotes(value);
    let parts: Vec<&str> = cleaned.split('/').collect();
    let [month, day, year] = parts.as_slice() else {
        return Err(format!(
            "expected M/D/YYYY, found {} part(s)",
            parts.len()
        ));
    };
    if [month, day, year]
        .iter()
        .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return Err("expected numeric M/D/YYYY parts".to_string());
    }
    Ok(format!("{}-{:0>2}-{:0>2}", year, month, day))
}

/// Year prefix of a canonical date or month string.
pub fn leading_year(value: &str) -> Option<i32> {
    value.get(..4)?.parse().ok()
}

/// Trims whitespace, then surrounding double quotes.
pub fn strip_quotes(value: &str) -> &str {
    value.trim().trim_matches('"').trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_month_pads() {
        assert_eq!(compose_month("1975", "1"), "1975-01");
        assert_eq!(compose_month("2024", "12"), "2024-12");
        assert_eq!(compose_month(" 2001 ", " 7"), "2001-07");
    }

    #[test]
    fn test_compose_then_parse_roundtrip() {
        for year in 1900..=2100 {
            for month in 1..=12u32 {
                let composed = compose_month(&year.to_string(), &month.to_string());
                assert_eq!(parse_month(&composed), Some((year, month)), "{}", composed);
            }
        }
    }

    #[test]
    fn test_parse_month_rejects_bad_shapes() {
        assert_eq!(parse_month("2020-13"), None);
        assert_eq!(parse_month("2020-00"), None);
        assert_eq!(parse_month("2020-1"), None);
        assert_eq!(parse_month("2020-01-01"), None);
    }

    #[test]
    fn test_month_day_year_to_iso() {
        assert_eq!(month_day_year_to_iso("1/2/2015").as_deref(), Ok("2015-01-02"));
        assert_eq!(month_day_year_to_iso(" \"12/31/1999\" ").as_deref(), Ok("1999-12-31"));
        assert!(month_day_year_to_iso("2015-01-02").is_err());
        assert!(month_day_year_to_iso("1/2").is_err());
        assert!(month_day_year_to_iso("a/b/2015").is_err());
    }

    #[test]
    fn test_iso_dates() {
        assert!(is_valid_date("2000-04-01"));
        assert!(!is_valid_date("2000-02-30"));
        assert!(!is_valid_date("2000-4-1"));
        assert_eq!(reformat_iso_date("2000-04-01").as_deref(), Ok("2000-04-01"));
        assert!(reformat_iso_date("04/01/2000").is_err());
    }

    #[test]
    fn test_leading_year() {
        assert_eq!(leading_year("1971-04-02"), Some(1971));
        assert_eq!(leading_year("19"), None);
    }
}
