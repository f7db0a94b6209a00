//! Auction Store Module
//!
//! The storage contract shared by every backend.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auction::Auction;
use crate::error::Result;

// == Auction Store ==
/// Storage for auction records.
///
/// Implementations must be safe to share between the expiry scheduler and
/// request handlers, and must behave identically for every operation.
#[async_trait]
pub trait AuctionStore: Send + Sync {
    /// Inserts a new auction keyed by its id.
    ///
    /// The start timestamp is stored with second precision; any sub-second
    /// part is dropped.
    ///
    /// Fails with `AlreadyExists` if the id is taken, or `Storage` if the
    /// underlying write fails.
    async fn create(&self, auction: &Auction) -> Result<()>;

    /// Returns the current state of the auction, or `NotFound`.
    async fn find_by_id(&self, id: &str) -> Result<Auction>;

    /// Transitions every active auction older than `duration` to completed.
    ///
    /// Returns the number of auctions closed; `Ok(0)` when nothing was due.
    async fn close_expired(&self, now: DateTime<Utc>, duration: Duration) -> Result<u64>;
}
