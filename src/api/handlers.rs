//! API Handlers
//!
//! HTTP request handlers for each auction endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auction::AuctionStore;
use crate::config::ExpirySettings;
use crate::error::Result;
use crate::models::{AuctionResponse, CreateAuctionRequest, CreateAuctionResponse, HealthResponse};
use crate::repository::AuctionRepository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Auction repository with its running expiry scheduler
    pub repository: Arc<AuctionRepository>,
}

impl AppState {
    /// Creates a new AppState around an existing repository.
    pub fn new(repository: Arc<AuctionRepository>) -> Self {
        Self { repository }
    }

    /// Creates a new AppState over `store`, starting the expiry scheduler.
    pub fn from_store(store: Arc<dyn AuctionStore>, settings: ExpirySettings) -> Self {
        Self::new(Arc::new(AuctionRepository::new(store, settings)))
    }
}

/// Handler for POST /auction
///
/// Validates the request and stores a new active auction starting now.
pub async fn create_auction_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateAuctionRequest>,
) -> Result<(StatusCode, Json<CreateAuctionResponse>)> {
    let auction = req.into_auction();
    auction.validate()?;

    state.repository.create_auction(&auction).await?;

    Ok((StatusCode::CREATED, Json(CreateAuctionResponse::new(auction.id))))
}

/// Handler for GET /auction/:id
pub async fn find_auction_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AuctionResponse>> {
    let auction = state.repository.find_auction_by_id(&id).await?;

    Ok(Json(auction.into()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
