// econdata-core/src/domain/bundle.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::error::DomainError;

/// Raw payloads fetched by ingest, keyed by source name.
///
/// Built once by the ingest phase and handed read-only to every transform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawBundle {
    payloads: BTreeMap<String, String>,
}

impl RawBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, payload: impl Into<String>) {
        self.payloads.insert(source.into(), payload.into());
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.payloads.get(source).map(String::as_str)
    }

    /// Payload for `source`, or `MissingSource` when ingest never stored it.
    pub fn require(&self, source: &str) -> Result<&str, DomainError> {
        self.get(source)
            .ok_or_else(|| DomainError::MissingSource(source.to_string()))
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.payloads.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawBundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            payloads: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_require_missing_source() {
        let bundle: RawBundle = [("pmms", "date,pmms30\n")].into_iter().collect();
        assert_eq!(bundle.require("pmms").unwrap(), "date,pmms30\n");

        let err = bundle.require("freddie_mac").unwrap_err();
        assert!(matches!(err, DomainError::MissingSource(ref s) if s == "freddie_mac"));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let bundle: RawBundle = [("a", "1"), ("b", "2")].into_iter().collect();
        let json = serde_json::to_string(&bundle).unwrap();
        assert_eq!(json, r#"{"a":"1","b":"2"}"#);

        let back: RawBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bundle);
    }
}
