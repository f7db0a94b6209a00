//! Auction Repository
//!
//! Entry point for callers: a store plus the expiry scheduler that keeps it
//! up to date.

use std::sync::Arc;

use tracing::info;

use crate::auction::{Auction, AuctionStore, DurationResolver};
use crate::config::ExpirySettings;
use crate::error::Result;
use crate::tasks::ExpiryScheduler;

/// Auction storage with automatic closure of expired auctions.
///
/// Constructing the repository starts the expiry scheduler; [`stop`](Self::stop)
/// must be called during shutdown.
pub struct AuctionRepository {
    store: Arc<dyn AuctionStore>,
    scheduler: ExpiryScheduler,
}

impl AuctionRepository {
    /// Creates the repository and starts sweeping `store` in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(store: Arc<dyn AuctionStore>, settings: ExpirySettings) -> Self {
        let resolver = DurationResolver::new(settings.auction_interval);
        info!(
            "Auctions close after {:?}, sweeping every {:?}",
            resolver.resolve(),
            settings.sweep_interval
        );

        let scheduler = ExpiryScheduler::start(store.clone(), resolver, settings.sweep_interval);
        Self { store, scheduler }
    }

    /// Stores a new auction.
    pub async fn create_auction(&self, auction: &Auction) -> Result<()> {
        self.store.create(auction).await
    }

    /// Returns the current state of an auction.
    pub async fn find_auction_by_id(&self, id: &str) -> Result<Auction> {
        self.store.find_by_id(id).await
    }

    /// Stops the expiry scheduler. Further calls have no effect.
    pub fn stop(&self) {
        self.scheduler.stop();
    }

    /// Waits for the expiry scheduler to exit after [`Self::stop`].
    pub async fn stopped(&self) {
        self.scheduler.stopped().await;
    }

    /// Returns true once the scheduler has been asked to stop.
    pub fn is_stopped(&self) -> bool {
        self.scheduler.is_stopped()
    }
}
