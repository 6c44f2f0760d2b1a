// econdata-core/src/ports/fetcher.rs

use async_trait::async_trait;
use std::time::Duration;

use crate::error::EconError;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Body of `url` as text. Non-success HTTP statuses are errors.
    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String, EconError>;
}
