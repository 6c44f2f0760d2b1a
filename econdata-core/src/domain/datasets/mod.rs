// econdata-core/src/domain/datasets/mod.rs
//
// Catalog of the published datasets and the raw sources they read.
// Dataset ids are an external contract: renaming one needs a migration.

pub mod big_mac;
pub mod house_price;
pub mod mortgage_rates;

use crate::domain::error::DomainError;
use crate::domain::transform::TransformRecipe;

/// Logical source names and their upstream URLs.
pub mod sources {
    pub const BIG_MAC: &str = "big_mac_index";
    pub const FREDDIE_MAC: &str = "freddie_mac";
    pub const PMMS: &str = "pmms";

    pub const DEFAULTS: [(&str, &str); 3] = [
        (
            BIG_MAC,
            "https://raw.githubusercontent.com/TheEconomist/big-mac-data/master/output-data/big-mac-full-index.csv",
        ),
        (
            FREDDIE_MAC,
            "https://www.freddiemac.com/fmac-resources/research/docs/fmhpi_master_file.csv",
        ),
        (PMMS, "https://www.freddiemac.com/pmms/docs/PMMS_history.csv"),
    ];
}

/// Key under which ingest stores the raw bundle.
pub const DEFAULT_BUNDLE_NAME: &str = "data_sources";

/// Null spellings recognised in headered CSV sources.
pub const COMMON_NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "N/A", "n/a", "NA", "NULL", "null", "NaN", "nan", "-NaN", "-nan",
];

/// Every dataset recipe, in the fixed order the transform phase runs them.
pub fn all() -> Result<Vec<TransformRecipe>, DomainError> {
    Ok(vec![
        big_mac::recipe()?,
        house_price::recipe()?,
        mortgage_rates::recipe()?,
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_order_and_stable_ids() {
        let ids: Vec<String> = all().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![
                "big_mac_index",
                "freddie_mac_house_price_index",
                "freddie_mac_mortgage_rates"
            ]
        );
    }

    #[test]
    fn test_every_recipe_reads_a_known_source() {
        for recipe in all().unwrap() {
            assert!(
                sources::DEFAULTS
                    .iter()
                    .any(|(name, _)| *name == recipe.source_key),
                "{} reads unknown source {}",
                recipe.id,
                recipe.source_key
            );
        }
    }

    #[test]
    fn test_metadata_documents_every_output() {
        for recipe in all().unwrap() {
            assert_eq!(recipe.metadata.id, recipe.id);
            for output in &recipe.outputs {
                assert!(
                    recipe.metadata.column_descriptions.contains_key(&output.name),
                    "{}.{} is undocumented",
                    recipe.id,
                    output.name
                );
            }
        }
    }
}
