// econdata-core/src/ports/raw_store.rs

use async_trait::async_trait;

use crate::domain::bundle::RawBundle;
use crate::error::EconError;

/// Persistence for raw bundles, keyed by bundle name.
#[async_trait]
pub trait RawStore: Send + Sync {
    /// Writes the whole bundle or nothing.
    async fn save(&self, name: &str, bundle: &RawBundle, compress: bool) -> Result<(), EconError>;

    async fn load(&self, name: &str) -> Result<RawBundle, EconError>;
}
