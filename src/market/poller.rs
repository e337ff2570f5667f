//! Background price refresh loop

use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use super::cache::PriceCache;
use crate::common::channels::{wait_for_shutdown, ShutdownReceiver};
use crate::common::traits::SharedProvider;
use crate::common::types::Symbol;

/// Outcome of one refresh pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
    pub updated: Vec<Symbol>,
    pub failed: Vec<Symbol>,
}

/// Refreshes the price cache from the provider on a fixed interval
pub struct PricePoller {
    provider: SharedProvider,
    cache: PriceCache,
    symbols: Vec<Symbol>,
}

impl PricePoller {
    /// Create a poller for every tracked symbol
    pub fn new(provider: SharedProvider, cache: PriceCache) -> Self {
        Self {
            provider,
            cache,
            symbols: Symbol::ALL.to_vec(),
        }
    }

    /// Restrict polling to a subset of symbols
    pub fn with_symbols(mut self, symbols: Vec<Symbol>) -> Self {
        self.symbols = symbols;
        self
    }

    /// Fetch every symbol once and store the successes
    ///
    /// A failure is logged and leaves that symbol's previous cache entry in
    /// place; the remaining symbols are still attempted.
    #[instrument(skip(self), fields(provider = self.provider.provider_name()))]
    pub async fn poll_once(&self) -> PollReport {
        let mut report = PollReport::default();

        for &symbol in &self.symbols {
            match self.provider.last_price(symbol).await {
                Ok(price) => {
                    self.cache.set(symbol, price).await;
                    debug!(%symbol, %price, "Price updated");
                    report.updated.push(symbol);
                }
                Err(e) => {
                    warn!(%symbol, error = %e, "Error updating price");
                    report.failed.push(symbol);
                }
            }
        }

        report
    }

    /// Poll every `period` until shutdown is requested
    ///
    /// Cycles run inline, so a slow cycle delays the next tick instead of
    /// overlapping with it; ticks missed meanwhile are skipped.
    pub async fn run(self, period: Duration, mut shutdown: ShutdownReceiver) {
        info!(
            "Price poller started for {} symbols every {:?}",
            self.symbols.len(),
            period
        );
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = wait_for_shutdown(&mut shutdown) => break,
                _ = interval.tick() => {}
            }

            tokio::select! {
                biased;
                _ = wait_for_shutdown(&mut shutdown) => break,
                report = self.poll_once() => {
                    if !report.failed.is_empty() {
                        debug!(failed = ?report.failed, "Poll cycle finished with failures");
                    }
                }
            }
        }

        info!("Price poller stopped");
    }
}
