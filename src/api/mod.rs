//! API Module
//!
//! HTTP handlers and routing for the slot query REST API.
//!
//! # Endpoints
//! - `GET /blockreward/:slot` - Reward status of the block at a slot
//! - `GET /syncduties/:slot` - Sync committee membership for a slot
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
