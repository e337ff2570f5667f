//! SoraBot Library
//!
//! A Discord bot that posts trading announcements, serves polled futures
//! prices and delivers one-shot price alerts by direct message.

pub mod app;
pub mod bot;
pub mod common;
pub mod config;
pub mod liveness;
pub mod market;
pub mod yahoo;

// Re-export commonly used types
pub use common::errors::{BotError, Result};
pub use common::traits::{Notifier, PriceProvider, SharedNotifier, SharedProvider};
pub use common::types::{Alert, RequesterId, Symbol, TriggeredAlert};
pub use crate::config::types::AppConfig;
pub use market::{AlertChecker, AlertRegistry, MarketState, PriceCache, PricePoller, PriceService};
pub use yahoo::YahooFinanceClient;
