//! Auction Module
//!
//! Auction records, the expiry rules, and the interchangeable store backends.

mod duration;
mod entity;
mod expiry;
mod memory;
mod sqlite;
mod store;


// Re-export public types
pub use duration::{DurationResolver, DEFAULT_AUCTION_DURATION};
pub use entity::{from_epoch_seconds, truncate_to_seconds, Auction, AuctionStatus, ProductCondition};
pub use expiry::{expiry_cutoff, is_expired};
pub use memory::InMemoryAuctionStore;
pub use sqlite::SqliteAuctionStore;
pub use store::AuctionStore;
