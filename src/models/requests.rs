//! Request DTOs for the auction API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::auction::{Auction, ProductCondition};

/// Request body for creating an auction (POST /auction)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuctionRequest {
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
}

impl CreateAuctionRequest {
    /// Builds a new active auction starting now from the request fields.
    pub fn into_auction(self) -> Auction {
        Auction::new(
            self.product_name,
            self.category,
            self.description,
            self.condition,
        )
    }
}
