//! Error types for the auction service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Auction Error Enum ==
/// Unified error type for the auction service.
#[derive(Error, Debug)]
pub enum AuctionError {
    /// No auction stored under the requested id
    #[error("Auction not found: {0}")]
    NotFound(String),

    /// An auction with the same id is already stored
    #[error("Auction already exists: {0}")]
    AlreadyExists(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The durable backend rejected a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AuctionError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuctionError::NotFound(_) => StatusCode::NOT_FOUND,
            AuctionError::AlreadyExists(_) => StatusCode::CONFLICT,
            AuctionError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AuctionError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuctionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the auction service.
pub type Result<T> = std::result::Result<T, AuctionError>;
