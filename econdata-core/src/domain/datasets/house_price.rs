// econdata-core/src/domain/datasets/house_price.rs

use crate::domain::error::DomainError;
use crate::domain::metadata::DatasetMetadata;
use crate::domain::table::ColumnType;
use crate::domain::transform::{ColumnKind, Derivation, TransformRecipe};
use crate::domain::validation::{Assertion, ValidationSpec};

use super::{COMMON_NULL_TOKENS, sources};

pub const DATASET_ID: &str = "freddie_mac_house_price_index";

/// Placeholder used upstream for rows with no geographic code (e.g. the US total).
const MISSING_GEO_CODE: &str = ".";

fn metadata() -> DatasetMetadata {
    DatasetMetadata::new(
        DATASET_ID,
        "Freddie Mac House Price Index",
        "Monthly house price index for US states, MSAs, and nationwide. Includes seasonally \
         adjusted and non-seasonally adjusted indices.",
        &[
            ("month", "Month of observation (YYYY-MM)"),
            ("geo_type", "Geographic type (State, MSA, US)"),
            (
                "geo_code",
                "Geographic code (FIPS code for states, CBSA code for MSAs)",
            ),
            ("geo_name", "Geographic area name"),
            ("index_nsa", "House Price Index (non-seasonally adjusted)"),
            ("index_sa", "House Price Index (seasonally adjusted)"),
        ],
    )
}

fn validation() -> ValidationSpec {
    ValidationSpec::new(10_000)
        .column("month", ColumnType::Utf8)
        .column("geo_type", ColumnType::Utf8)
        .column("geo_code", ColumnType::Utf8)
        .column("geo_name", ColumnType::Utf8)
        .column("index_nsa", ColumnType::Float64)
        .column("index_sa", ColumnType::Float64)
        .not_null(&["month", "geo_type", "geo_name"])
        .assert(Assertion::valid_month("month"))
        .assert(Assertion::in_set("geo_type", &["State", "MSA", "CBSA", "US"]))
        .assert(Assertion::positive("index_nsa"))
        .assert(Assertion::positive("index_sa"))
        .assert(Assertion::years_since("month", 1975))
}

pub fn recipe() -> Result<TransformRecipe, DomainError> {
    TransformRecipe::builder(DATASET_ID, sources::FREDDIE_MAC)
        .null_tokens(COMMON_NULL_TOKENS)
        .map("Year", "year")
        .map("Month", "month_number")
        .map("GEO_Type", "geo_type")
        .map("GEO_Code", "geo_code")
        .map("GEO_Name", "geo_name")
        .map("Index_NSA", "index_nsa")
        .map("Index_SA", "index_sa")
        .derive(Derivation::ComposeMonth {
            year: "year".into(),
            month: "month_number".into(),
            target: "month".into(),
        })
        .derive(Derivation::NullSentinel {
            column: "geo_code".into(),
            sentinel: MISSING_GEO_CODE.into(),
        })
        .output("month", ColumnKind::Text)
        .output("geo_type", ColumnKind::Text)
        .output("geo_code", ColumnKind::Text)
        .output("geo_name", ColumnKind::Text)
        .output("index_nsa", ColumnKind::Float)
        .output("index_sa", ColumnKind::Float)
        .essential(&["month"])
        .metadata(metadata())
        .validation(validation)
        .build()
}
