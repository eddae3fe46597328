//! Background expiration sweeper
//!
//! Expired entries are already invisible to reads, but they occupy map
//! space until something reclaims them. The sweeper is that something: a
//! periodic task that calls [`Store::sweep`] on a fixed interval.
//!
//! The interval is owned by whoever starts the sweeper, not by the store.
//! The store itself only exposes the synchronous `sweep` method, which
//! keeps it testable without a runtime or real time passing.

use super::memory::Store;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

/// A handle to the running sweeper task
///
/// Dropping the handle stops the task.
#[derive(Debug)]
pub struct Sweeper {
    shutdown_tx: watch::Sender<bool>,
}

impl Sweeper {
    /// Start the sweeper as a background task
    ///
    /// The interval should be small relative to the shortest TTL the
    /// deployment expects to honor.
    pub fn start(store: Arc<Store>, interval: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(sweep_loop(store, interval, shutdown_rx));
        info!(interval_ms = interval.as_millis() as u64, "expiration sweeper started");

        Sweeper { shutdown_tx }
    }

    /// Stop the sweeper task
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn sweep_loop(store: Arc<Store>, interval: Duration, mut shutdown_rx: watch::Receiver<bool>) {
    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            result = shutdown_rx.changed() => {
                if result.is_err() || *shutdown_rx.borrow() {
                    debug!("sweeper received shutdown signal");
                    return;
                }
            }
        }

        let removed = store.sweep();
        if removed > 0 {
            debug!(removed, live = store.len(), "expired entries swept");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Value;

    #[tokio::test]
    async fn test_sweeper_reclaims_expired_entries() {
        let store = Arc::new(Store::new());

        for i in 0..10 {
            store.insert_with_ttl(
                format!("key{}", i),
                Value::integer(i),
                Some(Duration::from_millis(30)),
            );
        }
        store.set_string("persistent", "v", 0);

        let _sweeper = Sweeper::start(Arc::clone(&store), Duration::from_millis(10));

        tokio::time::sleep(Duration::from_millis(150)).await;

        let stats = store.stats();
        assert_eq!(stats.total_keys, 1);
        assert_eq!(store.get_string("persistent"), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_sweeper_stops_on_drop() {
        let store = Arc::new(Store::new());

        {
            let _sweeper = Sweeper::start(Arc::clone(&store), Duration::from_millis(10));
            tokio::time::sleep(Duration::from_millis(30)).await;
        }

        store.insert_with_ttl("k", Value::string("v"), Some(Duration::from_millis(10)));
        tokio::time::sleep(Duration::from_millis(60)).await;

        // The corpse stays in the map because the sweeper is gone, but it
        // still reads as absent.
        assert_eq!(store.stats().total_keys, 1);
        assert!(store.get_entry("k").is_none());
    }
}
