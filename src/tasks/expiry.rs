//! Auction Expiry Task
//!
//! Background task that periodically closes auctions whose bidding window
//! has elapsed.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

use crate::auction::{AuctionStore, DurationResolver};
use crate::config::DEFAULT_SWEEP_INTERVAL_SECS;
use crate::error::Result;

// == Sweep ==
/// Runs a single sweep: closes every auction expired as of now.
///
/// Returns the number of auctions transitioned.
pub async fn sweep_once(store: &dyn AuctionStore, resolver: &DurationResolver) -> Result<u64> {
    let duration = resolver.resolve();
    store.close_expired(Utc::now(), duration).await
}

// == Expiry Scheduler ==
/// Owns the background sweep loop.
///
/// The loop starts on construction and runs until [`ExpiryScheduler::stop`]
/// is called or the scheduler is dropped. A stopped scheduler cannot be
/// restarted.
#[derive(Debug)]
pub struct ExpiryScheduler {
    token: CancellationToken,
    tracker: TaskTracker,
}

impl ExpiryScheduler {
    /// Spawns the sweep loop on the current tokio runtime.
    ///
    /// The first sweep happens one `sweep_interval` after start. Failed sweeps
    /// are logged and the loop carries on with the next tick. A zero interval
    /// is replaced by the default of `DEFAULT_SWEEP_INTERVAL_SECS`.
    ///
    /// # Example
    /// ```ignore
    /// let store: Arc<dyn AuctionStore> = Arc::new(InMemoryAuctionStore::new());
    /// let scheduler = ExpiryScheduler::start(store, DurationResolver::new(None), Duration::from_secs(5));
    /// // Later, during shutdown:
    /// scheduler.stop();
    /// scheduler.stopped().await;
    /// ```
    pub fn start(
        store: Arc<dyn AuctionStore>,
        resolver: DurationResolver,
        sweep_interval: Duration,
    ) -> Self {
        let sweep_interval = effective_interval(sweep_interval);
        let token = CancellationToken::new();
        let tracker = TaskTracker::new();

        let cancelled = token.clone();
        tracker.spawn(async move {
            info!(
                "Starting auction expiry task with interval of {:?}",
                sweep_interval
            );

            let mut ticker = interval_at(Instant::now() + sweep_interval, sweep_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                // Not raced against cancellation, so an in-flight sweep completes
                match sweep_once(store.as_ref(), &resolver).await {
                    Ok(0) => debug!("Auction sweep: no expired auctions found"),
                    Ok(closed) => info!("Auction sweep: closed {} expired auctions", closed),
                    Err(e) => error!("Auction sweep failed: {}", e),
                }
            }

            info!("Stopping auction expiry task");
        });

        Self { token, tracker }
    }

    /// Requests the loop to stop. Calling it again has no effect.
    pub fn stop(&self) {
        self.token.cancel();
        self.tracker.close();
    }

    /// Returns true once a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits until the loop has exited. Only resolves after [`Self::stop`].
    pub async fn stopped(&self) {
        self.tracker.wait().await;
    }
}

fn effective_interval(sweep_interval: Duration) -> Duration {
    if sweep_interval.is_zero() {
        warn!(
            "Sweep interval must be non-zero, falling back to {}s",
            DEFAULT_SWEEP_INTERVAL_SECS
        );
        return Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS);
    }
    sweep_interval
}

impl Drop for ExpiryScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
