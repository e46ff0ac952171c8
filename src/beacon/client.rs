//! Beacon Node HTTP Client
//!
//! reqwest-based client for the beacon REST API, behind the `ChainReader`
//! trait so the resolution layer can be tested against a mock chain. The
//! client never retries; retry policy, if any, belongs to the caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::beacon::types::{
    BlockResponse, BlockRewardsResponse, GenesisResponse, SignedBeaconBlock, SyncCommitteeResponse,
};

// == Beacon Error ==
/// Transport-level failures of the beacon node collaborator.
#[derive(Error, Debug)]
pub enum BeaconError {
    /// The node has no data for the requested resource (HTTP 404)
    #[error("resource not found")]
    NotFound,

    /// Transport failure, including request timeouts
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a status the client does not expect
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    /// A response field did not parse as its expected shape
    #[error("invalid {field} in response: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

impl BeaconError {
    /// True when the node reported it has no data for the resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BeaconError::NotFound)
    }

    /// True when the request exceeded its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, BeaconError::Http(err) if err.is_timeout())
    }
}

// == Chain Reader ==
/// The four fetch operations the resolution layer depends on.
///
/// All reads are idempotent and side-effect free.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Fetches the block proposed at `slot`.
    async fn block_by_slot(&self, slot: u64) -> Result<SignedBeaconBlock, BeaconError>;

    /// Fetches the total proposer reward for the block at `slot`, as the
    /// node's decimal string.
    async fn block_reward_total(&self, slot: u64) -> Result<String, BeaconError>;

    /// Fetches the sync committee validator list for the state at
    /// `state_slot` (a sync committee period's start slot).
    async fn sync_committee_validators(&self, state_slot: u64) -> Result<Vec<String>, BeaconError>;

    /// Fetches the chain's genesis time as a Unix timestamp.
    async fn genesis_time(&self) -> Result<u64, BeaconError>;
}

// == Beacon Api Client ==
/// HTTP client for a beacon node's REST API.
pub struct BeaconApiClient {
    client: reqwest::Client,
    endpoint: String,
    /// Monotonic request counter for log correlation
    request_counter: AtomicU64,
}

impl BeaconApiClient {
    /// Creates a new client against `endpoint` with a per-request timeout.
    ///
    /// When the timeout fires, the in-flight request is aborted and surfaces
    /// as a transport error rather than hanging the caller.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, BeaconError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let endpoint: String = endpoint.into();

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            request_counter: AtomicU64::new(0),
        })
    }

    /// Issues a GET against `/eth/v1/beacon/{path}` and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BeaconError> {
        let request_id = self.request_counter.fetch_add(1, Ordering::Relaxed) + 1;
        let url = format!("{}/eth/v1/beacon/{}", self.endpoint, path);

        debug!(request_id, %url, "beacon api request");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json::<T>().await?),
            StatusCode::NOT_FOUND => Err(BeaconError::NotFound),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(BeaconError::UnexpectedStatus { status, body })
            }
        }
    }
}

#[async_trait]
impl ChainReader for BeaconApiClient {
    async fn block_by_slot(&self, slot: u64) -> Result<SignedBeaconBlock, BeaconError> {
        let response: BlockResponse = self.get_json(&format!("blocks/{slot}")).await?;
        Ok(response.data)
    }

    async fn block_reward_total(&self, slot: u64) -> Result<String, BeaconError> {
        let response: BlockRewardsResponse = self.get_json(&format!("rewards/blocks/{slot}")).await?;
        Ok(response.data.total)
    }

    async fn sync_committee_validators(&self, state_slot: u64) -> Result<Vec<String>, BeaconError> {
        let response: SyncCommitteeResponse = self
            .get_json(&format!("states/{state_slot}/sync_committees"))
            .await?;
        Ok(response.data.validators)
    }

    async fn genesis_time(&self) -> Result<u64, BeaconError> {
        let response: GenesisResponse = self.get_json("genesis").await?;

        response
            .data
            .genesis_time
            .parse::<u64>()
            .map_err(|_| BeaconError::InvalidField {
                field: "genesis_time",
                value: response.data.genesis_time,
            })
    }
}
