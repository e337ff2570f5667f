//! Last-known price per symbol

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::common::types::Symbol;

/// Shared mapping from symbol to the last successfully polled price
///
/// Entries appear on the first successful poll, are overwritten on every
/// later one and are never removed. Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct PriceCache {
    prices: Arc<RwLock<HashMap<Symbol, Decimal>>>,
}

impl PriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached price, if one has ever been observed
    pub async fn get(&self, symbol: Symbol) -> Option<Decimal> {
        self.prices.read().await.get(&symbol).copied()
    }

    /// Overwrite the cached price for `symbol`
    pub async fn set(&self, symbol: Symbol, price: Decimal) {
        self.prices.write().await.insert(symbol, price);
    }

    /// Whether a price has ever been observed for `symbol`
    pub async fn contains(&self, symbol: Symbol) -> bool {
        self.prices.read().await.contains_key(&symbol)
    }

    /// Copy of every cached price
    pub async fn snapshot(&self) -> HashMap<Symbol, Decimal> {
        self.prices.read().await.clone()
    }
}
