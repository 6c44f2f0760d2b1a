// econdata-core/src/domain/datasets/big_mac.rs

use crate::domain::error::DomainError;
use crate::domain::metadata::DatasetMetadata;
use crate::domain::table::ColumnType;
use crate::domain::transform::{ColumnKind, DateLayout, TransformRecipe};
use crate::domain::validation::{Assertion, ValidationSpec};

use super::{COMMON_NULL_TOKENS, sources};

pub const DATASET_ID: &str = "big_mac_index";

const INDEX_COLUMNS: [(&str, &str, &str); 12] = [
    ("USD_raw", "usd_raw_index", "Raw index vs USD (% over/under valued)"),
    ("EUR_raw", "eur_raw_index", "Raw index vs EUR (% over/under valued)"),
    ("GBP_raw", "gbp_raw_index", "Raw index vs GBP (% over/under valued)"),
    ("JPY_raw", "jpy_raw_index", "Raw index vs JPY (% over/under valued)"),
    ("CNY_raw", "cny_raw_index", "Raw index vs CNY (% over/under valued)"),
    ("GDP_bigmac", "gdp_bigmac", "GDP per capita, Big Mac-adjusted"),
    ("adj_price", "adjusted_price", "GDP-adjusted price"),
    ("USD_adjusted", "usd_adjusted_index", "GDP-adjusted index vs USD"),
    ("EUR_adjusted", "eur_adjusted_index", "GDP-adjusted index vs EUR"),
    ("GBP_adjusted", "gbp_adjusted_index", "GDP-adjusted index vs GBP"),
    ("JPY_adjusted", "jpy_adjusted_index", "GDP-adjusted index vs JPY"),
    ("CNY_adjusted", "cny_adjusted_index", "GDP-adjusted index vs CNY"),
];

fn metadata() -> DatasetMetadata {
    let mut columns = vec![
        ("date", "Date of observation (YYYY-MM-DD)"),
        ("country_code", "ISO 3-letter country code"),
        ("country_name", "Country name"),
        ("currency_code", "Local currency code"),
        ("local_price", "Local price of a Big Mac in local currency"),
        ("exchange_rate", "Exchange rate to USD"),
        ("dollar_price", "Price in USD"),
    ];
    columns.extend(INDEX_COLUMNS.iter().map(|(_, name, doc)| (*name, *doc)));

    DatasetMetadata::new(
        DATASET_ID,
        "Big Mac Index",
        "The Economist's Big Mac Index - an informal measure of purchasing power parity \
         between currencies. Includes raw and GDP-adjusted indices against USD, EUR, GBP, \
         JPY, and CNY.",
        &columns,
    )
}

fn validation() -> ValidationSpec {
    let mut spec = ValidationSpec::new(100)
        .column("date", ColumnType::Utf8)
        .column("country_code", ColumnType::Utf8)
        .column("country_name", ColumnType::Utf8)
        .column("currency_code", ColumnType::Utf8)
        .column("local_price", ColumnType::Float64)
        .column("exchange_rate", ColumnType::Float64)
        .column("dollar_price", ColumnType::Float64);
    for (_, name, _) in INDEX_COLUMNS {
        spec = spec.column(name, ColumnType::Float64);
    }

    spec.not_null(&["date", "country_code", "dollar_price"])
        .assert(Assertion::valid_date("date"))
        .assert(Assertion::max_length("country_code", 3))
        .assert(Assertion::max_length("currency_code", 3))
        .assert(Assertion::positive("dollar_price"))
        .assert(Assertion::positive("local_price"))
        .assert(Assertion::years_since("date", 2000))
}

/// Core identity and price columns are required; the index columns have
/// come and gone across releases of the upstream file and are optional.
pub fn recipe() -> Result<TransformRecipe, DomainError> {
    let mut builder = TransformRecipe::builder(DATASET_ID, sources::BIG_MAC)
        .null_tokens(COMMON_NULL_TOKENS)
        .map("iso_a3", "country_code")
        .map("currency_code", "currency_code")
        .map("name", "country_name")
        .map("date", "date")
        .map("local_price", "local_price")
        .map("dollar_ex", "exchange_rate")
        .map("dollar_price", "dollar_price");
    for (source, target, _) in INDEX_COLUMNS {
        builder = builder.map_optional(source, target);
    }

    builder = builder
        .output("date", ColumnKind::Date(DateLayout::Iso))
        .output("country_code", ColumnKind::Text)
        .output("country_name", ColumnKind::Text)
        .output("currency_code", ColumnKind::Text)
        .output("local_price", ColumnKind::Float)
        .output("exchange_rate", ColumnKind::Float)
        .output("dollar_price", ColumnKind::Float);
    for (_, target, _) in INDEX_COLUMNS {
        builder = builder.output(target, ColumnKind::Float);
    }

    builder
        .essential(&["country_code", "date", "dollar_price"])
        .metadata(metadata())
        .validation(validation)
        .build()
}
