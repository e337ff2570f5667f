//! Background alert matching loop

use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::alerts::AlertRegistry;
use super::cache::PriceCache;
use crate::common::channels::{wait_for_shutdown, ShutdownReceiver};
use crate::common::traits::SharedNotifier;
use crate::common::types::{format_usd, TriggeredAlert};

/// Matches pending alerts against cached prices and notifies requesters
pub struct AlertChecker {
    cache: PriceCache,
    registry: AlertRegistry,
    notifier: SharedNotifier,
}

impl AlertChecker {
    pub fn new(cache: PriceCache, registry: AlertRegistry, notifier: SharedNotifier) -> Self {
        Self {
            cache,
            registry,
            notifier,
        }
    }

    /// Run one matching pass, returning the alerts that fired
    ///
    /// Matched alerts leave the registry before any message is sent, so a
    /// failed or slow delivery can never fire the same alert twice.
    pub async fn check_once(&self) -> Vec<TriggeredAlert> {
        let prices = self.cache.snapshot().await;
        if prices.is_empty() {
            return Vec::new();
        }

        let triggered = self.registry.take_triggered(&prices).await;

        for fired in &triggered {
            let message = notification_message(fired);
            match self.notifier.notify(fired.alert.requester, &message).await {
                Ok(()) => info!(
                    symbol = %fired.alert.symbol,
                    requester = %fired.alert.requester,
                    threshold = %fired.alert.threshold,
                    price = %fired.price,
                    "Alert fired"
                ),
                Err(e) => warn!(
                    symbol = %fired.alert.symbol,
                    requester = %fired.alert.requester,
                    error = %e,
                    "Alert fired but notification could not be delivered"
                ),
            }
        }

        triggered
    }

    /// Check every `period` until shutdown is requested
    ///
    /// Shutdown is only observed between cycles. A cycle that has taken
    /// alerts out of the registry always finishes delivering them.
    pub async fn run(self, period: Duration, mut shutdown: ShutdownReceiver) {
        info!("Alert checker started every {:?}", period);
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = wait_for_shutdown(&mut shutdown) => break,
                _ = interval.tick() => {}
            }

            let fired = self.check_once().await;
            if !fired.is_empty() {
                debug!("{} alerts fired this cycle", fired.len());
            }
        }

        info!("Alert checker stopped");
    }
}

/// Direct message text sent when an alert fires
pub fn notification_message(fired: &TriggeredAlert) -> String {
    format!(
        "Alert: {} has reached or exceeded your target price of {}! Current price: {}",
        fired.alert.symbol,
        format_usd(fired.alert.threshold),
        format_usd(fired.price)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::channels::create_shutdown_channel;
    use crate::common::errors::{BotError, Result};
    use crate::common::traits::{MockNotifier, Notifier};
    use crate::common::types::{Alert, RequesterId, Symbol};
    use async_trait::async_trait;
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Notifier that takes `delay` to deliver each message
    struct SlowNotifier {
        delay: Duration,
        delivered: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Notifier for SlowNotifier {
        async fn notify(&self, _requester: RequesterId, _message: &str) -> Result<()> {
            tokio::time::sleep(self.delay).await;
            self.delivered.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_shutdown_during_delivery_completes_cycle() {
        let cache = PriceCache::new();
        let registry = AlertRegistry::new();
        cache.set(Symbol::Es, dec!(4510)).await;
        for id in 1..=3 {
            registry
                .register(Alert::new(Symbol::Es, dec!(4505), RequesterId(id)))
                .await;
        }

        let delivered = Arc::new(AtomicUsize::new(0));
        let notifier = SlowNotifier {
            delay: Duration::from_millis(200),
            delivered: delivered.clone(),
        };
        let checker = AlertChecker::new(cache, registry.clone(), Arc::new(notifier));

        let (tx, rx) = create_shutdown_channel();
        let handle = tokio::spawn(checker.run(Duration::from_secs(60), rx));

        // First tick fires immediately; stop while the first DM is in flight
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();

        assert_eq!(delivered.load(Ordering::SeqCst), 3);
        assert_eq!(registry.pending_count().await, 0);
    }

    #[test]
    fn test_notification_message() {
        let fired = TriggeredAlert {
            alert: Alert::new(Symbol::Es, dec!(4505), RequesterId(1)),
            price: dec!(4510.25),
        };
        assert_eq!(
            notification_message(&fired),
            "Alert: ES has reached or exceeded your target price of $4505.00! Current price: $4510.25"
        );
    }

    #[tokio::test]
    async fn test_fires_once_and_removes() {
        let cache = PriceCache::new();
        let registry = AlertRegistry::new();
        cache.set(Symbol::Es, dec!(4510.25)).await;
        registry
            .register(Alert::new(Symbol::Es, dec!(4505), RequesterId(42)))
            .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|requester, message| *requester == RequesterId(42) && message.contains("ES"))
            .times(1)
            .returning(|_, _| Ok(()));

        let checker = AlertChecker::new(cache, registry.clone(), Arc::new(notifier));
        assert_eq!(checker.check_once().await.len(), 1);
        assert!(checker.check_once().await.is_empty());
        assert_eq!(registry.pending_count().await, 0);
    }

    #[tokio::test]
    async fn test_below_threshold_stays_pending() {
        let cache = PriceCache::new();
        let registry = AlertRegistry::new();
        cache.set(Symbol::Es, dec!(4500)).await;
        registry
            .register(Alert::new(Symbol::Es, dec!(4505), RequesterId(42)))
            .await;

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);

        let checker = AlertChecker::new(cache, registry.clone(), Arc::new(notifier));
        assert!(checker.check_once().await.is_empty());
        assert_eq!(registry.pending(Symbol::Es).await.len(), 1);
    }

    #[tokio::test]
    async fn test_delivery_failure_still_removes_and_continues() {
        let cache = PriceCache::new();
        let registry = AlertRegistry::new();
        cache.set(Symbol::Gc, dec!(2100)).await;
        registry
            .register(Alert::new(Symbol::Gc, dec!(2000), RequesterId(1)))
            .await;
        registry
            .register(Alert::new(Symbol::Gc, dec!(2050), RequesterId(2)))
            .await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .with(eq(RequesterId(1)), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Err(BotError::Notification("DMs disabled".to_string())));
        notifier
            .expect_notify()
            .with(eq(RequesterId(2)), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(()));

        let checker = AlertChecker::new(cache, registry.clone(), Arc::new(notifier));
        assert_eq!(checker.check_once().await.len(), 2);
        assert_eq!(registry.pending_count().await, 0);
    }

    #[tokio::test]
    async fn test_symbol_without_price_is_skipped() {
        let cache = PriceCache::new();
        let registry = AlertRegistry::new();
        cache.set(Symbol::Es, dec!(4500)).await;
        registry
            .register(Alert::new(Symbol::Cl, dec!(1), RequesterId(3)))
            .await;

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);

        let checker = AlertChecker::new(cache, registry.clone(), Arc::new(notifier));
        assert!(checker.check_once().await.is_empty());
        assert_eq!(registry.pending_count().await, 1);
    }
}
