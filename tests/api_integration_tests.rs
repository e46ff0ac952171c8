//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle for each endpoint against a mock
//! beacon chain, including the error-category to status-code mapping.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tower::ServiceExt;

use beacon_query::api::create_router;
use beacon_query::beacon::{
    BeaconBlock, BeaconError, BlockBody, ChainReader, ExecutionPayload, SignedBeaconBlock,
};
use beacon_query::cache::CacheStore;
use beacon_query::clock::{unix_now, SECONDS_PER_SLOT, SLOTS_PER_SYNC_COMMITTEE_PERIOD};
use beacon_query::service::{CachedValue, ClassifierConfig, ResolverService, SharedCache};
use beacon_query::AppState;

// == Mock Chain ==

struct MockChain {
    current_slot: u64,
    block: Option<SignedBeaconBlock>,
    reward_total: String,
    validators: Vec<String>,
    block_fetches: AtomicUsize,
}

impl MockChain {
    fn new(current_slot: u64) -> Self {
        Self {
            current_slot,
            block: Some(mev_block()),
            reward_total: "1000000000000000000".to_string(),
            validators: vec!["11".to_string(), "22".to_string(), "33".to_string()],
            block_fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn block_by_slot(&self, _slot: u64) -> Result<SignedBeaconBlock, BeaconError> {
        self.block_fetches.fetch_add(1, Ordering::SeqCst);
        self.block.clone().ok_or(BeaconError::NotFound)
    }

    async fn block_reward_total(&self, _slot: u64) -> Result<String, BeaconError> {
        Ok(self.reward_total.clone())
    }

    async fn sync_committee_validators(&self, _state_slot: u64) -> Result<Vec<String>, BeaconError> {
        Ok(self.validators.clone())
    }

    async fn genesis_time(&self) -> Result<u64, BeaconError> {
        Ok(unix_now() - self.current_slot * SECONDS_PER_SLOT)
    }
}

// == Helper Functions ==

fn mev_block() -> SignedBeaconBlock {
    SignedBeaconBlock {
        message: BeaconBlock {
            slot: "12345".to_string(),
            proposer_index: "42".to_string(),
            body: BlockBody {
                execution_payload: Some(ExecutionPayload {
                    fee_recipient: "0x0000000000000000000000000000000000000001".to_string(),
                    block_hash: "0xabc".to_string(),
                    transactions: vec!["0xa22cb465deadbeef".to_string()],
                }),
            },
        },
    }
}

fn create_test_app(chain: Arc<MockChain>) -> (Router, SharedCache) {
    let cache: SharedCache = Arc::new(RwLock::new(CacheStore::new(100, Duration::from_secs(300))));
    let service = Arc::new(ResolverService::new(
        chain,
        cache.clone(),
        ClassifierConfig::default(),
    ));
    let state = AppState::new(service, cache.clone());
    (create_router(state), cache)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// == Block Reward Endpoint Tests ==

#[tokio::test]
async fn test_block_reward_end_to_end_mev() {
    let chain = Arc::new(MockChain::new(20_000));
    let (app, cache) = create_test_app(chain);

    let (status, json) = get(&app, "/blockreward/12345").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "mev");
    assert_eq!(json["data"]["reward"], "1000000000000000000");

    // The resolved result must be retrievable from the cache under its
    // prefixed key immediately after.
    let cached = cache.write().await.get("block_reward:12345");
    assert!(matches!(cached, Some(CachedValue::BlockReward(_))));
}

#[tokio::test]
async fn test_block_reward_second_request_hits_cache() {
    let chain = Arc::new(MockChain::new(20_000));
    let (app, _cache) = create_test_app(chain.clone());

    let (first_status, first) = get(&app, "/blockreward/12345").await;
    let (second_status, second) = get(&app, "/blockreward/12345").await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(chain.block_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_block_reward_future_slot_is_bad_request() {
    let chain = Arc::new(MockChain::new(20_000));
    let (app, _cache) = create_test_app(chain);

    let (status, json) = get(&app, "/blockreward/20001").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("future"));
}

#[tokio::test]
async fn test_block_reward_missed_slot_is_not_found() {
    let mut chain = MockChain::new(20_000);
    chain.block = None;
    let (app, _cache) = create_test_app(Arc::new(chain));

    let (status, json) = get(&app, "/blockreward/12345").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_block_reward_invalid_slot_is_bad_request() {
    let chain = Arc::new(MockChain::new(20_000));
    let (app, _cache) = create_test_app(chain);

    let (status, json) = get(&app, "/blockreward/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn test_block_reward_malformed_reward_is_internal() {
    let mut chain = MockChain::new(20_000);
    chain.reward_total = "garbage".to_string();
    let (app, _cache) = create_test_app(Arc::new(chain));

    let (status, _json) = get(&app, "/blockreward/12345").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// == Sync Duties Endpoint Tests ==

#[tokio::test]
async fn test_sync_duties_success() {
    let chain = Arc::new(MockChain::new(20_000));
    let (app, _cache) = create_test_app(chain);

    let (status, json) = get(&app, "/syncduties/12345").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["validators"][0], "11");
    assert_eq!(json["data"]["validators"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_sync_duties_too_far_in_future_is_bad_request() {
    let chain = Arc::new(MockChain::new(20_000));
    let (app, _cache) = create_test_app(chain);

    let slot = 20_000 + SLOTS_PER_SYNC_COMMITTEE_PERIOD + 1;
    let (status, json) = get(&app, &format!("/syncduties/{slot}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("too far"));
}

#[tokio::test]
async fn test_sync_duties_fills_prefixed_cache_key() {
    let chain = Arc::new(MockChain::new(20_000));
    let (app, cache) = create_test_app(chain);

    let (status, _json) = get(&app, "/syncduties/12345").await;
    assert_eq!(status, StatusCode::OK);

    let cached = cache.write().await.get("sync_duties:12345");
    assert!(matches!(cached, Some(CachedValue::SyncDuties(_))));
}

// == Health and Stats Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let chain = Arc::new(MockChain::new(20_000));
    let (app, _cache) = create_test_app(chain);

    let (status, json) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_stats_endpoint_reflects_cache_activity() {
    let chain = Arc::new(MockChain::new(20_000));
    let (app, _cache) = create_test_app(chain);

    // Miss then hit.
    get(&app, "/blockreward/12345").await;
    get(&app, "/blockreward/12345").await;

    let (status, json) = get(&app, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 1);
}
