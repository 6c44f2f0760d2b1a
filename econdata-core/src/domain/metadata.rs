// econdata-core/src/domain/metadata.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Human-facing descriptor published next to a dataset's table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub column_descriptions: BTreeMap<String, String>,
}

impl DatasetMetadata {
    pub fn new(id: &str, title: &str, description: &str, columns: &[(&str, &str)]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            column_descriptions: columns
                .iter()
                .map(|(name, doc)| (name.to_string(), doc.to_string()))
                .collect(),
        }
    }
}
