/// Graceful shutdown coordination
///
/// A signal handler flips the global flag and wakes the notifier; the web
/// server uses the notifier for graceful termination and main flushes logs
/// before exiting.
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger::{self, LogTag};

/// Set once a shutdown signal has been received
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Woken when shutdown is requested
static SHUTDOWN_NOTIFY: Lazy<Arc<Notify>> = Lazy::new(|| Arc::new(Notify::new()));

/// Install the Ctrl-C / SIGTERM handler
///
/// Call once at startup. A second signal while shutdown is already in
/// progress exits immediately.
pub fn install_signal_handler() -> Result<(), String> {
    ctrlc::set_handler(|| {
        if SHUTDOWN_REQUESTED.swap(true, Ordering::SeqCst) {
            // Second signal: the operator really means it
            eprintln!("Forced exit");
            std::process::exit(1);
        }

        logger::info(LogTag::System, "🛑 Shutdown signal received");
        SHUTDOWN_NOTIFY.notify_waiters();
    })
    .map_err(|e| format!("Failed to install signal handler: {}", e))
}

/// Has a shutdown signal been received?
pub fn is_shutdown_requested() -> bool {
    SHUTDOWN_REQUESTED.load(Ordering::SeqCst)
}

/// Request shutdown programmatically (tests, fatal errors)
pub fn request_shutdown() {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
    SHUTDOWN_NOTIFY.notify_waiters();
}

/// Wait until shutdown is requested
pub async fn wait_for_shutdown() {
    // Register before checking the flag so a signal between the check and
    // the await cannot be missed
    let notified = SHUTDOWN_NOTIFY.notified();
    if is_shutdown_requested() {
        return;
    }
    notified.await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_request_unblocks_waiters() {
        request_shutdown();
        assert!(is_shutdown_requested());
        // Must return immediately once the flag is set
        wait_for_shutdown().await;
    }
}
