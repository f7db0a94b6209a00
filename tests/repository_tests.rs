//! Repository Tests
//!
//! Exercises the background expiry loop end to end on the SQLite backend.

use std::sync::Arc;
use std::time::Duration;

use auction_sweeper::auction::{Auction, AuctionStatus, ProductCondition, SqliteAuctionStore};
use auction_sweeper::{AuctionRepository, ExpirySettings};

const SWEEP_INTERVAL: Duration = Duration::from_millis(50);

fn settings() -> ExpirySettings {
    ExpirySettings {
        auction_interval: Some("10m".to_string()),
        sweep_interval: SWEEP_INTERVAL,
    }
}

fn backdated(id: &str, age: chrono::Duration) -> Auction {
    let mut auction = Auction::new(
        "Test Product",
        "Test Category",
        "Test Description",
        ProductCondition::Used,
    );
    auction.id = id.to_string();
    auction.timestamp = auction.timestamp - age;
    auction
}

async fn sqlite_repository() -> AuctionRepository {
    let store = SqliteAuctionStore::connect("sqlite::memory:").await.unwrap();
    AuctionRepository::new(Arc::new(store), settings())
}

#[tokio::test]
async fn test_durable_store_closes_expired_auctions() {
    let repository = sqlite_repository().await;
    repository
        .create_auction(&backdated("expired", chrono::Duration::hours(1)))
        .await
        .unwrap();
    repository
        .create_auction(&backdated("fresh", chrono::Duration::seconds(10)))
        .await
        .unwrap();

    tokio::time::sleep(SWEEP_INTERVAL * 6).await;

    let expired = repository.find_auction_by_id("expired").await.unwrap();
    let fresh = repository.find_auction_by_id("fresh").await.unwrap();
    assert_eq!(expired.status, AuctionStatus::Completed);
    assert_eq!(fresh.status, AuctionStatus::Active);

    repository.stop();
    repository.stopped().await;
}

#[tokio::test]
async fn test_durable_store_untouched_after_stop() {
    let repository = sqlite_repository().await;
    repository.stop();
    repository.stopped().await;

    repository
        .create_auction(&backdated("late", chrono::Duration::hours(1)))
        .await
        .unwrap();
    tokio::time::sleep(SWEEP_INTERVAL * 6).await;

    let late = repository.find_auction_by_id("late").await.unwrap();
    assert_eq!(late.status, AuctionStatus::Active);
}

#[tokio::test]
async fn test_find_observes_status_after_sweep() {
    let repository = sqlite_repository().await;
    let auction = backdated("a1", chrono::Duration::minutes(30));
    repository.create_auction(&auction).await.unwrap();

    let before = repository.find_auction_by_id("a1").await.unwrap();
    assert_eq!(before.status, AuctionStatus::Active);

    tokio::time::sleep(SWEEP_INTERVAL * 6).await;

    let after = repository.find_auction_by_id("a1").await.unwrap();
    assert_eq!(after.status, AuctionStatus::Completed);
    assert_eq!(after.timestamp, auction.timestamp);
    assert_eq!(after.product_name, auction.product_name);

    repository.stop();
}
