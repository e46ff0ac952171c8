//! API Handlers
//!
//! HTTP request handlers for each slot query endpoint. Handlers parse the
//! slot path segment, delegate to the resolution service, and rely on the
//! error taxonomy's response mapping for every failure path.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::error::Result;
use crate::models::{ApiResponse, BlockReward, HealthResponse, StatsResponse, SyncCommitteeDuties};
use crate::service::{parse_slot, ResolverService, SharedCache};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Resolution service
    pub service: Arc<ResolverService>,
    /// The service's cache, exposed for the stats endpoint
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState over a service and its cache.
    pub fn new(service: Arc<ResolverService>, cache: SharedCache) -> Self {
        Self { service, cache }
    }
}

/// Handler for GET /blockreward/:slot
pub async fn block_reward_handler(
    State(state): State<AppState>,
    Path(slot): Path<String>,
) -> Result<Json<ApiResponse<BlockReward>>> {
    let slot = parse_slot(&slot)?;

    info!(slot, "processing block reward request");
    let reward = state.service.resolve_block_reward(slot).await?;

    Ok(Json(ApiResponse::new(reward)))
}

/// Handler for GET /syncduties/:slot
pub async fn sync_duties_handler(
    State(state): State<AppState>,
    Path(slot): Path<String>,
) -> Result<Json<ApiResponse<SyncCommitteeDuties>>> {
    let slot = parse_slot(&slot)?;

    info!(slot, "processing sync duties request");
    let duties = state.service.resolve_sync_duties(slot).await?;

    Ok(Json(ApiResponse::new(duties)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(&cache.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
