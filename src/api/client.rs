//! HTTP client for the Market Info backend

use crate::api::types::{StockHistory, StockSnapshot, Suggestion, Timeframe};
use crate::config::ClientConfig;
use crate::error::{AppError, Result};
use crate::search::SuggestionSource;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Market Info REST client
#[derive(Debug, Clone)]
pub struct MarketApiClient {
    client: Client,
    base_url: String,
}

impl MarketApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the company search endpoint for `query`
    ///
    /// The query is percent-encoded component-style, so spaces become `%20`.
    pub fn companies_url(&self, query: &str) -> String {
        format!(
            "{}/api/companies?query={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    /// Search companies by symbol or name
    pub async fn search_companies(&self, query: &str) -> Result<Vec<Suggestion>> {
        self.get_json(self.companies_url(query)).await
    }

    /// Company profile and latest price
    pub async fn get_stock(
        &self,
        ticker: &str,
        advanced: bool,
        dividend: bool,
    ) -> Result<StockSnapshot> {
        let url = format!(
            "{}/api/stock/{}?advanced={}&dividend={}",
            self.base_url,
            urlencoding::encode(&ticker.to_uppercase()),
            advanced,
            dividend
        );
        self.get_json(url).await
    }

    /// Daily candles for the timeframe, optionally with dividend markers
    pub async fn get_history(
        &self,
        ticker: &str,
        timeframe: Timeframe,
        dividend: bool,
    ) -> Result<StockHistory> {
        let url = format!(
            "{}/api/stock/{}/history?timeframe={}&dividend={}",
            self.base_url,
            urlencoding::encode(&ticker.to_uppercase()),
            timeframe,
            dividend
        );
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status { status, url });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SuggestionSource for MarketApiClient {
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>> {
        self.search_companies(query).await
    }
}
