//! Trait definitions for the external collaborators

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::errors::Result;
use super::types::{RequesterId, Symbol};

/// Trait for market data sources
///
/// The poller calls `last_price` for every tracked symbol on each cycle;
/// the trend command calls `close_series` on demand.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Latest traded price for the symbol
    async fn last_price(&self, symbol: Symbol) -> Result<Decimal>;

    /// Daily closing prices, oldest first
    ///
    /// # Arguments
    /// * `symbol` - Symbol to fetch history for
    /// * `range` - Lookback window understood by the provider (`5d`, `1y`, ...)
    async fn close_series(&self, symbol: Symbol, range: &str) -> Result<Vec<Decimal>>;

    /// Name of the provider, used in logs and reply footers
    fn provider_name(&self) -> &'static str;
}

/// Trait for delivering direct messages to users
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `message` privately to `requester`
    async fn notify(&self, requester: RequesterId, message: &str) -> Result<()>;
}

/// Shared provider handle for dynamic dispatch
pub type SharedProvider = Arc<dyn PriceProvider>;

/// Shared notifier handle for dynamic dispatch
pub type SharedNotifier = Arc<dyn Notifier>;
