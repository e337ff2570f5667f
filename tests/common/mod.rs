//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use rust_decimal::Decimal;
use sora_bot::common::errors::{BotError, Result};
use sora_bot::common::traits::{Notifier, PriceProvider};
use sora_bot::common::types::{RequesterId, Symbol};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Provider whose answers are set by the test between cycles
#[derive(Default)]
pub struct ScriptedProvider {
    prices: Mutex<HashMap<Symbol, Decimal>>,
    failing: Mutex<HashSet<Symbol>>,
    series: Mutex<Vec<Decimal>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_price(&self, symbol: Symbol, price: Decimal) {
        self.failing.lock().unwrap().remove(&symbol);
        self.prices.lock().unwrap().insert(symbol, price);
    }

    pub fn fail(&self, symbol: Symbol) {
        self.failing.lock().unwrap().insert(symbol);
    }

    pub fn set_series(&self, closes: Vec<Decimal>) {
        *self.series.lock().unwrap() = closes;
    }
}

#[async_trait]
impl PriceProvider for ScriptedProvider {
    async fn last_price(&self, symbol: Symbol) -> Result<Decimal> {
        if self.failing.lock().unwrap().contains(&symbol) {
            return Err(BotError::InvalidResponse(format!("scripted failure for {}", symbol)));
        }
        self.prices
            .lock()
            .unwrap()
            .get(&symbol)
            .copied()
            .ok_or_else(|| BotError::PriceUnavailable(symbol.to_string()))
    }

    async fn close_series(&self, _symbol: Symbol, _range: &str) -> Result<Vec<Decimal>> {
        Ok(self.series.lock().unwrap().clone())
    }

    fn provider_name(&self) -> &'static str {
        "Scripted"
    }
}

/// Notifier that records every delivery and can refuse chosen users
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(RequesterId, String)>>,
    refusing: Mutex<HashSet<RequesterId>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a user with direct messages disabled
    pub fn refuse(&self, requester: RequesterId) {
        self.refusing.lock().unwrap().insert(requester);
    }

    pub fn sent(&self) -> Vec<(RequesterId, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, requester: RequesterId) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| *to == requester)
            .count()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, requester: RequesterId, message: &str) -> Result<()> {
        if self.refusing.lock().unwrap().contains(&requester) {
            return Err(BotError::Notification("Cannot send messages to this user".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((requester, message.to_string()));
        Ok(())
    }
}

/// Sample Yahoo Finance chart API responses
pub mod api_responses {
    /// Chart for gold with a live price and one missing bar
    pub const GOLD_CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": {
                    "symbol": "GC=F",
                    "currency": "USD",
                    "regularMarketPrice": 2034.5,
                    "previousClose": 2029.0
                },
                "timestamp": [1704067200, 1704153600, 1704240000, 1704326400],
                "indicators": {
                    "quote": [{
                        "open": [2025.0, null, 2030.0, 2031.0],
                        "close": [2030.25, null, 2031.75, 2033.0]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    /// Chart for the S&P 500 index
    pub const SP500_CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "^GSPC", "regularMarketPrice": 4510.25},
                "timestamp": [1704067200],
                "indicators": {"quote": [{"close": [4500.0]}]}
            }],
            "error": null
        }
    }"#;

    /// Error envelope for an unknown instrument
    pub const NOT_FOUND: &str = r#"{
        "chart": {
            "result": null,
            "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
        }
    }"#;
}
