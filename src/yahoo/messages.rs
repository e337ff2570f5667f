//! Yahoo Finance chart API message types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level response of `/v8/finance/chart/{code}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

/// Chart envelope; exactly one of `result` / `error` is normally set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// Error object returned inside a chart response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

/// Chart data for one instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    /// Unix timestamps of each bar
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

impl ChartResult {
    /// Closing prices with gaps (`null` bars) removed, oldest first
    pub fn closes(&self) -> Vec<Decimal> {
        self.indicators
            .quote
            .first()
            .map(|quote| quote.close.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// Best available last price: the live market price, else the last close
    pub fn last_price(&self) -> Option<Decimal> {
        self.meta
            .regular_market_price
            .or_else(|| self.closes().last().copied())
    }
}

/// Instrument metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub regular_market_price: Option<Decimal>,
    #[serde(default)]
    pub previous_close: Option<Decimal>,
    #[serde(default)]
    pub exchange_name: Option<String>,
}

/// Indicator series attached to a chart
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

/// OHLC series; individual bars may be `null`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<Decimal>>,
    #[serde(default)]
    pub high: Vec<Option<Decimal>>,
    #[serde(default)]
    pub low: Vec<Option<Decimal>>,
    #[serde(default)]
    pub close: Vec<Option<Decimal>>,
}
