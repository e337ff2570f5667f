//! Pending price alerts per symbol

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::common::types::{Alert, Symbol, TriggeredAlert};

/// Shared registry of alerts that have not fired yet
///
/// Alerts for a symbol are kept in registration order. Registration appends;
/// [`AlertRegistry::take_triggered`] is the only way alerts leave.
#[derive(Debug, Clone, Default)]
pub struct AlertRegistry {
    alerts: Arc<RwLock<HashMap<Symbol, Vec<Alert>>>>,
}

impl AlertRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an alert, returning how many are now pending for its symbol
    pub async fn register(&self, alert: Alert) -> usize {
        let mut alerts = self.alerts.write().await;
        let pending = alerts.entry(alert.symbol).or_default();
        pending.push(alert);
        pending.len()
    }

    /// Pending alerts for `symbol`, oldest first
    pub async fn pending(&self, symbol: Symbol) -> Vec<Alert> {
        self.alerts
            .read()
            .await
            .get(&symbol)
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of pending alerts across all symbols
    pub async fn pending_count(&self) -> usize {
        self.alerts.read().await.values().map(Vec::len).sum()
    }

    /// Remove and return every alert satisfied by `prices`
    ///
    /// The whole scan happens under one write guard, so an alert is handed
    /// out at most once no matter how often this is called concurrently.
    /// Symbols without a price are left untouched.
    pub async fn take_triggered(&self, prices: &HashMap<Symbol, Decimal>) -> Vec<TriggeredAlert> {
        let mut alerts = self.alerts.write().await;
        let mut triggered = Vec::new();

        for (symbol, pending) in alerts.iter_mut() {
            let Some(&price) = prices.get(symbol) else {
                continue;
            };

            let (fired, remaining): (Vec<Alert>, Vec<Alert>) = std::mem::take(pending)
                .into_iter()
                .partition(|alert| alert.is_triggered(price));
            *pending = remaining;

            triggered.extend(fired.into_iter().map(|alert| TriggeredAlert { alert, price }));
        }

        alerts.retain(|_, pending| !pending.is_empty());
        triggered
    }
}
