use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::{HTTP_CONNECT_TIMEOUT_SECS, HTTP_REQUEST_TIMEOUT_SECS};
use crate::data::Asset;
use crate::request::PageFetchError;
use crate::third_party::coincap::data::ApiAssetsResponse;

/// Anything that can hand out pages of assets.
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<Asset>, PageFetchError>;
}

#[derive(Clone, Debug)]
pub struct CoinCapClient {
    http: Client,
    assets_url: String,
}

impl CoinCapClient {
    pub fn new(assets_url: impl Into<String>) -> Result<Self, PageFetchError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            assets_url: assets_url.into(),
        })
    }

    pub fn assets_url(&self) -> &str {
        &self.assets_url
    }
}

#[async_trait]
impl AssetSource for CoinCapClient {
    async fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<Asset>, PageFetchError> {
        let response = self
            .http
            .get(&self.assets_url)
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageFetchError::Status {
                status,
                url: response.url().to_string(),
            });
        }

        let body = response.text().await?;
        let parse_json: ApiAssetsResponse = serde_json::from_str(&body)?;
        Ok(parse_json.data.into_iter().map(Asset::from).collect())
    }
}
