//! Auction Sweeper - Auction persistence with automatic expiry
//!
//! Stores auctions in memory or in SQLite and closes every auction whose
//! bidding window has elapsed from a background task.

pub mod api;
pub mod auction;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod tasks;

pub use api::AppState;
pub use config::{Config, ExpirySettings};
pub use repository::AuctionRepository;
pub use tasks::ExpiryScheduler;
