// econdata-core/src/application/test_support.rs
//
// In-memory ports and generated source files shared by the use-case tests.

#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::bundle::RawBundle;
use crate::domain::datasets::sources;
use crate::domain::metadata::DatasetMetadata;
use crate::domain::table::Table;
use crate::error::EconError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::{Fetcher, RawStore, Sink};

#[derive(Default, Clone)]
pub struct MockFetcher {
    bodies: HashMap<String, String>,
    statuses: HashMap<String, u16>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.statuses.insert(url.to_string(), status);
        self
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn get_text(&self, url: &str, _timeout: Duration) -> Result<String, EconError> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(status) = self.statuses.get(url) {
            return Err(InfrastructureError::HttpStatus {
                url: url.to_string(),
                status: *status,
            }
            .into());
        }
        self.bodies.get(url).cloned().ok_or_else(|| {
            InfrastructureError::Fetch {
                url: url.to_string(),
                message: "connection refused".into(),
            }
            .into()
        })
    }
}

#[derive(Default, Clone)]
pub struct MemoryStore {
    pub saved: Arc<Mutex<Vec<(String, RawBundle, bool)>>>,
}

impl MemoryStore {
    pub fn holding(name: &str, bundle: RawBundle) -> Self {
        let store = Self::default();
        store
            .saved
            .lock()
            .unwrap()
            .push((name.to_string(), bundle, false));
        store
    }
}

#[async_trait]
impl RawStore for MemoryStore {
    async fn save(&self, name: &str, bundle: &RawBundle, compress: bool) -> Result<(), EconError> {
        self.saved
            .lock()
            .unwrap()
            .push((name.to_string(), bundle.clone(), compress));
        Ok(())
    }

    async fn load(&self, name: &str) -> Result<RawBundle, EconError> {
        self.saved
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(n, _, _)| n == name)
            .map(|(_, b, _)| b.clone())
            .ok_or_else(|| InfrastructureError::BundleNotFound(name.to_string()).into())
    }
}

#[derive(Default, Clone)]
pub struct MockSink {
    /// (dataset id, row count) per upload
    pub uploads: Arc<Mutex<Vec<(String, usize)>>>,
    pub published: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Sink for MockSink {
    async fn upload_data(&self, table: &Table, dataset_id: &str) -> Result<(), EconError> {
        self.uploads
            .lock()
            .unwrap()
            .push((dataset_id.to_string(), table.num_rows()));
        Ok(())
    }

    async fn publish(&self, dataset_id: &str, metadata: &DatasetMetadata) -> Result<(), EconError> {
        assert_eq!(metadata.id, dataset_id);
        self.published.lock().unwrap().push(dataset_id.to_string());
        Ok(())
    }
}

pub fn big_mac_csv(rows: usize) -> String {
    let mut out = String::from(
        "name,iso_a3,currency_code,local_price,dollar_ex,dollar_price,USD_raw,EUR_raw,GBP_raw,\
         JPY_raw,CNY_raw,GDP_bigmac,adj_price,USD_adjusted,EUR_adjusted,GBP_adjusted,\
         JPY_adjusted,CNY_adjusted,date\n",
    );
    for i in 0..rows {
        out.push_str(&format!(
            "Country {i},C{:02},LCU,{}.0,1.5,{}.5,-0.1,0.2,0.1,0.3,0.05,,,,,,,,20{:02}-07-01\n",
            i % 100,
            2 + i % 7,
            1 + i % 5,
            i % 24
        ));
    }
    out
}

pub fn house_price_csv(rows: usize) -> String {
    let mut out = String::from("GEO_Type,GEO_Name,GEO_Code,Year,Month,Index_NSA,Index_SA\n");
    for i in 0..rows {
        let (geo_type, geo_code) = match i % 3 {
            0 => ("State", "06"),
            1 => ("MSA", "10180"),
            _ => ("US", "."),
        };
        out.push_str(&format!(
            "{geo_type},Area {},{geo_code},{},{},{}.25,{}.5\n",
            i % 3,
            1975 + (i / 12) % 50,
            1 + i % 12,
            50 + i % 200,
            50 + i % 200
        ));
    }
    out
}

pub fn pmms_csv(rows: usize) -> String {
    let mut out = String::from(
        "date,pmms30,pmms30p,pmms15,pmms15p,pmms51,pmms51p,pmms51m,pmms51spread\n",
    );
    for i in 0..rows {
        let date = format!("{}/{}/{}", 1 + i % 12, 1 + i % 28, 1971 + i % 50);
        if i < 1000 {
            out.push_str(&format!("{date},7.33,0.5,,\n"));
        } else {
            out.push_str(&format!("{date},6.61,0.8,5.98,1.0,,,,\n"));
        }
    }
    out
}

/// A bundle whose three datasets all pass validation.
pub fn valid_bundle() -> RawBundle {
    [
        (sources::BIG_MAC, big_mac_csv(120)),
        (sources::FREDDIE_MAC, house_price_csv(10_000)),
        (sources::PMMS, pmms_csv(2_100)),
    ]
    .into_iter()
    .collect()
}
