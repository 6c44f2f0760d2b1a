// econdata-core/src/infrastructure/adapters/raw_store.rs
//
// Raw bundles live in `<data_dir>/raw/` as one JSON object per bundle,
// `<name>.json` or gzip-compressed `<name>.json.gz`.

use async_trait::async_trait;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::bundle::RawBundle;
use crate::error::EconError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;
use crate::ports::raw_store::RawStore;

pub struct FsRawStore {
    dir: PathBuf,
}

impl FsRawStore {
    /// `data_dir` is the project data root; bundles go under its `raw/` child.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: data_dir.as_ref().join("raw"),
        }
    }

    fn path_for(&self, name: &str, compressed: bool) -> PathBuf {
        let file = if compressed {
            format!("{}.json.gz", name)
        } else {
            format!("{}.json", name)
        };
        self.dir.join(file)
    }
}

fn encode(bundle: &RawBundle, compress: bool) -> Result<Vec<u8>, InfrastructureError> {
    let json = serde_json::to_vec(bundle)?;
    if !compress {
        return Ok(json);
    }
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json)?;
    Ok(encoder.finish()?)
}

fn decode(bytes: &[u8], compressed: bool) -> Result<RawBundle, InfrastructureError> {
    if !compressed {
        return Ok(serde_json::from_slice(bytes)?);
    }
    let mut json = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut json)?;
    Ok(serde_json::from_slice(&json)?)
}

#[async_trait]
impl RawStore for FsRawStore {
    #[instrument(skip(self, bundle), fields(sources = bundle.len()))]
    async fn save(&self, name: &str, bundle: &RawBundle, compress: bool) -> Result<(), EconError> {
        let bytes = encode(bundle, compress)?;
        let path = self.path_for(name, compress);
        atomic_write(&path, &bytes)?;

        // A leftover file in the other format would shadow or confuse the next load
        let stale = self.path_for(name, !compress);
        if stale.exists() {
            fs::remove_file(&stale)?;
        }

        info!(path = ?path, bytes = bytes.len(), "Raw bundle saved");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn load(&self, name: &str) -> Result<RawBundle, EconError> {
        for compressed in [true, false] {
            let path = self.path_for(name, compressed);
            if path.exists() {
                let bytes = fs::read(&path)?;
                let bundle = decode(&bytes, compressed)?;
                info!(path = ?path, sources = bundle.len(), "Raw bundle loaded");
                return Ok(bundle);
            }
        }
        Err(InfrastructureError::BundleNotFound(name.to_string()).into())
    }
}
