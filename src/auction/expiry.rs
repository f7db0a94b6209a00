//! Expiry Predicate Module
//!
//! Decides which auctions have outlived their bidding window.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::auction::AuctionStatus;

// == Expiry Cutoff ==
/// Latest start timestamp that counts as expired at `now`.
///
/// Saturates at the earliest representable instant for absurdly long durations.
pub fn expiry_cutoff(now: DateTime<Utc>, duration: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(duration)
        .ok()
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

// == Is Expired ==
/// Returns true iff the auction is active and `now - start >= duration`.
///
/// Boundary condition: an auction whose age equals the duration exactly is
/// expired. Completed auctions are never eligible, whatever their age.
pub fn is_expired(
    status: AuctionStatus,
    start: DateTime<Utc>,
    now: DateTime<Utc>,
    duration: Duration,
) -> bool {
    status == AuctionStatus::Active && start <= expiry_cutoff(now, duration)
}
