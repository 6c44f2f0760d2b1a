// econdata-core/src/domain/datasets/mortgage_rates.rs
//
// Primary Mortgage Market Survey. Since late 2022 the file dropped its ARM
// columns, so older rows carry more fields than newer ones and the header no
// longer matches every row. Rows are read positionally, padded to 9 fields.

use crate::domain::error::DomainError;
use crate::domain::metadata::DatasetMetadata;
use crate::domain::table::ColumnType;
use crate::domain::transform::{ColumnKind, DateLayout, ParseMode, TransformRecipe};
use crate::domain::validation::{Assertion, ValidationSpec};

use super::sources;

pub const DATASET_ID: &str = "freddie_mac_mortgage_rates";

const ROW_WIDTH: usize = 9;

fn metadata() -> DatasetMetadata {
    DatasetMetadata::new(
        DATASET_ID,
        "Freddie Mac Mortgage Rates (PMMS)",
        "Weekly average mortgage rates from Freddie Mac's Primary Mortgage Market Survey, \
         the most-cited source of US mortgage rates. Data from 1971 to present.",
        &[
            ("date", "Survey date (YYYY-MM-DD)"),
            ("rate_30yr", "30-year fixed-rate mortgage average (%)"),
            ("points_30yr", "30-year fixed-rate points/fees (%)"),
            ("rate_15yr", "15-year fixed-rate mortgage average (%)"),
            ("points_15yr", "15-year fixed-rate points/fees (%)"),
        ],
    )
}

fn validation() -> ValidationSpec {
    ValidationSpec::new(2000)
        .column("date", ColumnType::Utf8)
        .column("rate_30yr", ColumnType::Float64)
        .column("points_30yr", ColumnType::Float64)
        .column("rate_15yr", ColumnType::Float64)
        .column("points_15yr", ColumnType::Float64)
        .not_null(&["date", "rate_30yr"])
        .assert(Assertion::valid_date("date"))
        .assert(Assertion::in_range("rate_30yr", 0.0, 20.0))
        .assert(Assertion::in_range("rate_15yr", 0.0, 20.0))
        .assert(Assertion::in_range("points_30yr", 0.0, 10.0))
        .assert(Assertion::in_range("points_15yr", 0.0, 10.0))
        .assert(Assertion::years_since("date", 1971))
        // The 15-year series only starts in 1991
        .assert(Assertion::min_non_null("rate_15yr", 1000))
}

pub fn recipe() -> Result<TransformRecipe, DomainError> {
    TransformRecipe::builder(DATASET_ID, sources::PMMS)
        .parse_mode(ParseMode::Padded { width: ROW_WIDTH })
        .map_position(0, "date")
        .map_position(1, "rate_30yr")
        .map_position(2, "points_30yr")
        .map_position(3, "rate_15yr")
        .map_position(4, "points_15yr")
        .output("date", ColumnKind::Date(DateLayout::MonthDayYear))
        .output("rate_30yr", ColumnKind::Float)
        .output("points_30yr", ColumnKind::Float)
        .output("rate_15yr", ColumnKind::Float)
        .output("points_15yr", ColumnKind::Float)
        .essential(&["date"])
        .metadata(metadata())
        .validation(validation)
        .build()
}
