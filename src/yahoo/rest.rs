//! REST client for the Yahoo Finance chart API

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, instrument};

use super::messages::{ChartResponse, ChartResult};
use crate::common::errors::{BotError, Result};
use crate::common::traits::PriceProvider;
use crate::common::types::Symbol;
use crate::config::types::ProviderConfig;

/// Bar size requested for every chart call
const DAILY_INTERVAL: &str = "1d";

/// Range used when only the latest price is needed
const LAST_PRICE_RANGE: &str = "1d";

/// Yahoo rejects requests without a browser-like user agent
const USER_AGENT: &str = "Mozilla/5.0 (compatible; sora-bot/0.1)";

/// Ranges accepted by the chart endpoint
pub const VALID_RANGES: [&str; 10] = [
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "ytd", "max",
];

/// REST client for Yahoo Finance
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    /// HTTP client
    client: Client,
    /// Base URL, e.g. `https://query1.finance.yahoo.com`
    base_url: String,
}

impl YahooFinanceClient {
    /// Create a new client with the default timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(10))
    }

    /// Create a new client with custom timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from provider configuration
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        Self::with_timeout(
            &config.base_url,
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    /// Fetch daily chart data for an instrument code
    ///
    /// # Arguments
    /// * `code` - Provider instrument code (`^GSPC`, `GC=F`, ...)
    /// * `range` - One of [`VALID_RANGES`]
    #[instrument(skip(self))]
    pub async fn get_chart(&self, code: &str, range: &str) -> Result<ChartResult> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, encode_code(code));
        debug!("Fetching chart from: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("interval", DAILY_INTERVAL), ("range", range)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // Yahoo reports unknown codes as a 404 carrying a normal error envelope
        let parsed: std::result::Result<ChartResponse, _> = serde_json::from_str(&body);
        if let Ok(ChartResponse { chart }) = &parsed {
            if let Some(err) = &chart.error {
                return Err(BotError::InvalidResponse(format!(
                    "{}: {}",
                    err.code, err.description
                )));
            }
        }

        if !status.is_success() {
            return Err(BotError::InvalidResponse(format!(
                "Server returned status {}: {}",
                status, body
            )));
        }

        parsed?
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| BotError::InvalidResponse(format!("No chart data for {}", code)))
    }

    /// Get the latest price for an instrument code
    #[instrument(skip(self))]
    pub async fn get_last_price(&self, code: &str) -> Result<Decimal> {
        let chart = self.get_chart(code, LAST_PRICE_RANGE).await?;
        chart
            .last_price()
            .ok_or_else(|| BotError::PriceUnavailable(code.to_string()))
    }

    /// Get daily closes for an instrument code, oldest first
    #[instrument(skip(self))]
    pub async fn get_close_series(&self, code: &str, range: &str) -> Result<Vec<Decimal>> {
        if !VALID_RANGES.contains(&range) {
            return Err(BotError::InvalidInput(format!(
                "Unsupported range '{}'; use one of {}",
                range,
                VALID_RANGES.join(", ")
            )));
        }
        let chart = self.get_chart(code, range).await?;
        Ok(chart.closes())
    }
}

/// Percent-encode the characters of index codes that are not path-safe
fn encode_code(code: &str) -> String {
    code.replace('^', "%5E")
}

#[async_trait]
impl PriceProvider for YahooFinanceClient {
    async fn last_price(&self, symbol: Symbol) -> Result<Decimal> {
        self.get_last_price(symbol.provider_code()).await
    }

    async fn close_series(&self, symbol: Symbol, range: &str) -> Result<Vec<Decimal>> {
        self.get_close_series(symbol.provider_code(), range).await
    }

    fn provider_name(&self) -> &'static str {
        "Yahoo Finance"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = YahooFinanceClient::new("https://query1.finance.yahoo.com");
        assert!(client.is_ok());
    }

    #[test]
    fn test_url_normalization() {
        let client = YahooFinanceClient::new("https://query1.finance.yahoo.com/").unwrap();
        assert!(!client.base_url.ends_with('/'));
    }

    #[test]
    fn test_index_codes_are_encoded() {
        assert_eq!(encode_code("^GSPC"), "%5EGSPC");
        assert_eq!(encode_code("GC=F"), "GC=F");
    }

    #[tokio::test]
    async fn test_invalid_range_is_rejected_before_request() {
        // Unroutable address: the call must fail on validation, not on the network
        let client = YahooFinanceClient::new("http://127.0.0.1:9").unwrap();
        let result = client.get_close_series("GC=F", "fortnight").await;
        assert!(matches!(result, Err(BotError::InvalidInput(_))));
    }
}
