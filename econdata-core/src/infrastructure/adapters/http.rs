// econdata-core/src/infrastructure/adapters/http.rs

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::error::EconError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::fetcher::Fetcher;

pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("econdata/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                InfrastructureError::Environment(format!("HTTP client cannot be built: {}", e))
            })?;
        Ok(Self { client })
    }
}

fn fetch_error(url: &str, err: reqwest::Error) -> EconError {
    let message = if err.is_timeout() {
        format!("timed out ({})", err)
    } else {
        err.to_string()
    };
    InfrastructureError::Fetch {
        url: url.to_string(),
        message,
    }
    .into()
}

#[async_trait]
impl Fetcher for ReqwestFetcher {
    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String, EconError> {
        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| fetch_error(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(InfrastructureError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = resp.text().await.map_err(|e| fetch_error(url, e))?;
        debug!(url, bytes = body.len(), "Fetched");
        Ok(body)
    }
}
