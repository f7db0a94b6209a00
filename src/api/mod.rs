//! API Module
//!
//! HTTP handlers and routing for the auction REST API.
//!
//! # Endpoints
//! - `POST /auction` - Create an auction
//! - `GET /auction/:id` - Fetch an auction by id
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
