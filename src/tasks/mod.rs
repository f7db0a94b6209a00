//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Auction Expiry: Closes auctions whose bidding window has elapsed

mod expiry;

pub use expiry::{sweep_once, ExpiryScheduler};
