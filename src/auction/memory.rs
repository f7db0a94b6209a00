//! In-Memory Auction Store
//!
//! HashMap-backed store guarded by an async RwLock.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::auction::{is_expired, truncate_to_seconds, Auction, AuctionStatus, AuctionStore};
use crate::error::{AuctionError, Result};

// == In-Memory Store ==
/// Auction store that keeps every record in process memory.
#[derive(Debug, Default)]
pub struct InMemoryAuctionStore {
    auctions: RwLock<HashMap<String, Auction>>,
}

impl InMemoryAuctionStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the number of stored auctions.
    pub async fn len(&self) -> usize {
        self.auctions.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if no auction is stored.
    pub async fn is_empty(&self) -> bool {
        self.auctions.read().await.is_empty()
    }
}

#[async_trait]
impl AuctionStore for InMemoryAuctionStore {
    async fn create(&self, auction: &Auction) -> Result<()> {
        let mut auctions = self.auctions.write().await;
        if auctions.contains_key(&auction.id) {
            return Err(AuctionError::AlreadyExists(auction.id.clone()));
        }
        // Second precision, matching what the durable backend persists
        let mut stored = auction.clone();
        stored.timestamp = truncate_to_seconds(stored.timestamp);
        auctions.insert(stored.id.clone(), stored);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Auction> {
        self.auctions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AuctionError::NotFound(id.to_string()))
    }

    async fn close_expired(&self, now: DateTime<Utc>, duration: Duration) -> Result<u64> {
        let mut auctions = self.auctions.write().await;
        let mut closed = 0;

        for auction in auctions.values_mut() {
            if is_expired(auction.status, auction.timestamp, now, duration) {
                auction.status = AuctionStatus::Completed;
                closed += 1;
            }
        }

        Ok(closed)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::ProductCondition;
    use chrono::Timelike;

    const TEN_MINUTES: Duration = Duration::from_secs(600);

    fn auction(id: &str, status: AuctionStatus, age: chrono::Duration) -> Auction {
        Auction {
            id: id.to_string(),
            product_name: "Test Product".to_string(),
            category: "Test Category".to_string(),
            description: "Test Description".to_string(),
            condition: ProductCondition::New,
            status,
            timestamp: truncate_to_seconds(Utc::now()) - age,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = InMemoryAuctionStore::new();
        let created = auction("test_auction", AuctionStatus::Active, chrono::Duration::zero());

        store.create(&created).await.unwrap();
        let found = store.find_by_id("test_auction").await.unwrap();

        assert_eq!(found, created);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_drops_sub_second_start() {
        let store = InMemoryAuctionStore::new();
        let mut created = auction("fractional", AuctionStatus::Active, chrono::Duration::zero());
        created.timestamp = created.timestamp + chrono::Duration::milliseconds(900);

        store.create(&created).await.unwrap();
        let found = store.find_by_id("fractional").await.unwrap();

        assert_eq!(found.timestamp.nanosecond(), 0);
        assert_eq!(found.timestamp, truncate_to_seconds(created.timestamp));
    }

    #[tokio::test]
    async fn test_find_nonexistent() {
        let store = InMemoryAuctionStore::new();

        let result = store.find_by_id("nonexistent").await;
        assert!(matches!(result, Err(AuctionError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_duplicate_id() {
        let store = InMemoryAuctionStore::new();
        let first = auction("dup", AuctionStatus::Active, chrono::Duration::zero());
        store.create(&first).await.unwrap();

        let mut second = first.clone();
        second.product_name = "Other Product".to_string();
        let result = store.create(&second).await;

        assert!(matches!(result, Err(AuctionError::AlreadyExists(_))));
        assert_eq!(
            store.find_by_id("dup").await.unwrap().product_name,
            "Test Product"
        );
    }

    #[tokio::test]
    async fn test_close_expired_empty_store() {
        let store = InMemoryAuctionStore::new();

        let closed = store.close_expired(Utc::now(), TEN_MINUTES).await.unwrap();
        assert_eq!(closed, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_close_expired_counts_transitions() {
        let store = InMemoryAuctionStore::new();
        store
            .create(&auction("old", AuctionStatus::Active, chrono::Duration::hours(1)))
            .await
            .unwrap();
        store
            .create(&auction("older", AuctionStatus::Active, chrono::Duration::hours(2)))
            .await
            .unwrap();
        store
            .create(&auction("done", AuctionStatus::Completed, chrono::Duration::hours(3)))
            .await
            .unwrap();

        let closed = store.close_expired(Utc::now(), TEN_MINUTES).await.unwrap();
        assert_eq!(closed, 2);

        let closed_again = store.close_expired(Utc::now(), TEN_MINUTES).await.unwrap();
        assert_eq!(closed_again, 0);
    }

    #[tokio::test]
    async fn test_concurrent_create_during_sweeps() {
        use std::sync::Arc;

        let store = Arc::new(InMemoryAuctionStore::new());
        let mut handles = Vec::new();

        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let id = format!("auction{}", i);
                store
                    .create(&auction(&id, AuctionStatus::Active, chrono::Duration::hours(1)))
                    .await
                    .unwrap();
                store.close_expired(Utc::now(), TEN_MINUTES).await.unwrap();
            }));
        }

        for handle in handles {
            handle.await.expect("Task should not panic");
        }

        // Every auction was created before at least one sweep finished
        for i in 0..20 {
            let found = store.find_by_id(&format!("auction{}", i)).await.unwrap();
            assert_eq!(found.status, AuctionStatus::Completed);
        }
    }
}
