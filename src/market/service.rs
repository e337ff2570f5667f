//! Lifecycle of the poller and checker tasks

use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::checker::AlertChecker;
use super::poller::PricePoller;
use super::MarketState;
use crate::common::channels::{create_shutdown_channel, ShutdownSender};
use crate::common::traits::{SharedNotifier, SharedProvider};
use crate::config::types::AppSettings;

/// Tick periods of the two background tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceIntervals {
    pub poll: Duration,
    pub alert: Duration,
}

impl From<&AppSettings> for ServiceIntervals {
    fn from(settings: &AppSettings) -> Self {
        Self {
            poll: settings.poll_interval(),
            alert: settings.alert_interval(),
        }
    }
}

/// Running price poller and alert checker, started and stopped together
pub struct PriceService {
    shutdown: ShutdownSender,
    handles: Vec<JoinHandle<()>>,
}

impl PriceService {
    /// Spawn both background tasks
    pub fn start(
        state: MarketState,
        provider: SharedProvider,
        notifier: SharedNotifier,
        intervals: ServiceIntervals,
    ) -> Self {
        let (shutdown, receiver) = create_shutdown_channel();

        let poller = PricePoller::new(provider, state.cache.clone());
        let checker = AlertChecker::new(state.cache, state.registry, notifier);

        let handles = vec![
            tokio::spawn(poller.run(intervals.poll, receiver.clone())),
            tokio::spawn(checker.run(intervals.alert, receiver)),
        ];

        info!(
            poll = ?intervals.poll,
            alert = ?intervals.alert,
            "Price service started"
        );
        Self { shutdown, handles }
    }

    /// Whether any background task is still running
    pub fn is_running(&self) -> bool {
        self.handles.iter().any(|handle| !handle.is_finished())
    }

    /// Signal both tasks to stop and wait for them
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        for handle in self.handles {
            if let Err(e) = handle.await {
                warn!("Background task ended abnormally: {}", e);
            }
        }
        info!("Price service stopped");
    }
}
