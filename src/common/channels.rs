//! Shutdown signalling between the owner of the background tasks and the tasks

use tokio::sync::watch;

/// Sending half, held by whoever owns the tasks
pub type ShutdownSender = watch::Sender<bool>;

/// Receiving half, one clone per background task
pub type ShutdownReceiver = watch::Receiver<bool>;

/// Create a new shutdown channel in the "running" state
pub fn create_shutdown_channel() -> (ShutdownSender, ShutdownReceiver) {
    watch::channel(false)
}

/// Resolve once shutdown has been requested or the sender is gone
pub async fn wait_for_shutdown(receiver: &mut ShutdownReceiver) {
    while !*receiver.borrow_and_update() {
        if receiver.changed().await.is_err() {
            return;
        }
    }
}
