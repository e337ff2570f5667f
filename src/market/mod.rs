//! Market module - price cache, alert registry and the background tasks
//! that keep them moving
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  last_price   ┌────────────┐
//! │ PricePoller  │──────────────▶│ PriceCache │◀──── prices / set_alert
//! └──────────────┘   every 5s    └─────┬──────┘
//!                                      │ snapshot
//!                                      ▼
//! ┌──────────────┐  take_triggered ┌───────────────┐
//! │ AlertChecker │────────────────▶│ AlertRegistry │◀── set_alert
//! └──────┬───────┘                 └───────────────┘
//!        │ notify (after removal)
//!        ▼
//!    Notifier
//! ```

pub mod alerts;
pub mod cache;
pub mod checker;
pub mod poller;
pub mod service;

pub use alerts::AlertRegistry;
pub use cache::PriceCache;
pub use checker::AlertChecker;
pub use poller::{PollReport, PricePoller};
pub use service::{PriceService, ServiceIntervals};

/// Shared state handed to command handlers and background tasks
#[derive(Debug, Clone, Default)]
pub struct MarketState {
    pub cache: PriceCache,
    pub registry: AlertRegistry,
}

impl MarketState {
    pub fn new() -> Self {
        Self::default()
    }
}
