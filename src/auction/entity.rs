//! Auction Entity Module
//!
//! Defines the auction record and the enums persisted alongside it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuctionError, Result};

// == Auction Status ==
/// Lifecycle state of an auction. Only `Active -> Completed` ever happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuctionStatus {
    Active,
    Completed,
}

impl AuctionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuctionStatus::Active => "active",
            AuctionStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuctionStatus {
    type Err = AuctionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(AuctionStatus::Active),
            "completed" => Ok(AuctionStatus::Completed),
            other => Err(AuctionError::Internal(format!(
                "Unknown auction status: {}",
                other
            ))),
        }
    }
}

// == Product Condition ==
/// Condition of the product being auctioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

impl ProductCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCondition::New => "new",
            ProductCondition::Used => "used",
            ProductCondition::Refurbished => "refurbished",
        }
    }
}

impl FromStr for ProductCondition {
    type Err = AuctionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "new" => Ok(ProductCondition::New),
            "used" => Ok(ProductCondition::Used),
            "refurbished" => Ok(ProductCondition::Refurbished),
            other => Err(AuctionError::Internal(format!(
                "Unknown product condition: {}",
                other
            ))),
        }
    }
}

// == Auction ==
/// A single auction record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    /// Unique identifier, immutable after creation
    pub id: String,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
    /// Current lifecycle state
    pub status: AuctionStatus,
    /// Start of the bidding window, second precision
    pub timestamp: DateTime<Utc>,
}

impl Auction {
    // == Constructor ==
    /// Creates a new active auction starting now, with a random id.
    ///
    /// The start timestamp is truncated to whole seconds so that every store
    /// backend, including those persisting epoch seconds, sees the same instant.
    pub fn new(
        product_name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        condition: ProductCondition,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product_name: product_name.into(),
            category: category.into(),
            description: description.into(),
            condition,
            status: AuctionStatus::Active,
            timestamp: truncate_to_seconds(Utc::now()),
        }
    }

    // == Validate ==
    /// Checks the descriptive fields against the creation rules.
    pub fn validate(&self) -> Result<()> {
        if self.product_name.chars().count() <= 1 {
            return Err(AuctionError::InvalidRequest(
                "Product name must be longer than 1 character".to_string(),
            ));
        }
        if self.category.chars().count() <= 2 {
            return Err(AuctionError::InvalidRequest(
                "Category must be longer than 2 characters".to_string(),
            ));
        }
        if self.description.chars().count() <= 10 {
            return Err(AuctionError::InvalidRequest(
                "Description must be longer than 10 characters".to_string(),
            ));
        }
        Ok(())
    }
}

// == Utility Functions ==
/// Drops the sub-second part of a timestamp.
pub fn truncate_to_seconds(time: DateTime<Utc>) -> DateTime<Utc> {
    from_epoch_seconds(time.timestamp()).unwrap_or(time)
}

/// Converts epoch seconds back into a UTC timestamp.
pub fn from_epoch_seconds(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}
