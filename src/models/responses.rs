//! Response DTOs for the auction API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auction::{Auction, AuctionStatus, ProductCondition};

/// Response body for fetching an auction (GET /auction/:id)
#[derive(Debug, Clone, Serialize)]
pub struct AuctionResponse {
    pub id: String,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
    pub status: AuctionStatus,
    /// Start of the bidding window in ISO 8601 format
    pub timestamp: DateTime<Utc>,
}

impl From<Auction> for AuctionResponse {
    fn from(auction: Auction) -> Self {
        Self {
            id: auction.id,
            product_name: auction.product_name,
            category: auction.category,
            description: auction.description,
            condition: auction.condition,
            status: auction.status,
            timestamp: auction.timestamp,
        }
    }
}

/// Response body for creating an auction (POST /auction)
#[derive(Debug, Clone, Serialize)]
pub struct CreateAuctionResponse {
    /// Success message
    pub message: String,
    /// Id of the created auction
    pub id: String,
}

impl CreateAuctionResponse {
    /// Creates a new CreateAuctionResponse
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("Auction '{}' created successfully", id),
            id,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
