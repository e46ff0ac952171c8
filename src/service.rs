//! Resolution Service
//!
//! Orchestrates cache lookups, bounds validation against the chain's current
//! slot, beacon node fetches, and reward classification. Each operation runs
//! cache-check, bounds-check, fetch + classify, cache-fill, in that order.
//!
//! Concurrent misses for the same key are not deduplicated: both callers
//! fetch independently. Beacon reads are idempotent and side-effect free, so
//! the only cost is a duplicate request.

use std::sync::Arc;

use primitive_types::U256;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::beacon::{BeaconError, BlockBody, ChainReader};
use crate::cache::CacheStore;
use crate::clock::{
    sync_period_of_slot, sync_period_start_slot, ChainClock, SLOTS_PER_SYNC_COMMITTEE_PERIOD,
};
use crate::error::{ApiError, Result};
use crate::models::{BlockReward, RewardStatus, SyncCommitteeDuties};

// == Cached Value ==
/// Tagged container for the two result kinds sharing one cache store.
#[derive(Debug, Clone)]
pub enum CachedValue {
    BlockReward(BlockReward),
    SyncDuties(SyncCommitteeDuties),
}

/// Shared cache holding both result kinds under prefixed keys.
pub type SharedCache = Arc<RwLock<CacheStore<CachedValue>>>;

// == Classifier Config ==
/// Heuristic signal sets for MEV classification.
///
/// These are chain-configuration, not protocol invariants: relays and MEV
/// contract selectors change across networks and over time, so the
/// surrounding system supplies them. The defaults match Ethereum mainnet.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Leading 4-byte transaction selectors (0x-prefixed hex) that indicate
    /// MEV activity
    pub mev_selectors: Vec<String>,
    /// Fee recipient addresses of known MEV relays, matched
    /// case-insensitively
    pub mev_relay_recipients: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            mev_selectors: vec![
                "0xa22cb465".to_string(),
                "0x095ea7b3".to_string(),
                "0x23b872dd".to_string(),
            ],
            mev_relay_recipients: vec![
                "0x95222290dd7278aa3ddd389cc1e1d165cc4bafe5".to_string(),
                "0x388c818ca8b9251b393131c08a736a67ccb19297".to_string(),
                "0x8b5d7a6055e54e36e8a6e2a128c5d0f38f4e5e83".to_string(),
            ],
        }
    }
}

// == Resolver Service ==
/// Resolves slot queries against the beacon node, through the cache.
pub struct ResolverService {
    chain: Arc<dyn ChainReader>,
    clock: ChainClock,
    cache: SharedCache,
    classifier: ClassifierConfig,
}

impl ResolverService {
    /// Creates a new ResolverService over the given chain reader and cache.
    pub fn new(chain: Arc<dyn ChainReader>, cache: SharedCache, classifier: ClassifierConfig) -> Self {
        Self {
            clock: ChainClock::new(chain.clone()),
            chain,
            cache,
            classifier,
        }
    }

    // == Block Reward ==
    /// Resolves the reward status of the block proposed at `slot`.
    ///
    /// Cached results are returned as-is until they expire; no bounds
    /// re-check on hits. `FutureSlot` when the slot has not occurred yet,
    /// `SlotNotFound` when the chain has no block for it (a missed slot is
    /// an expected chain condition, not a system fault).
    pub async fn resolve_block_reward(&self, slot: u64) -> Result<BlockReward> {
        info!(slot, "resolving block reward");

        let cache_key = format!("block_reward:{slot}");
        if let Some(CachedValue::BlockReward(reward)) = self.cache.write().await.get(&cache_key) {
            debug!(slot, "returning cached block reward");
            return Ok(reward);
        }

        let current_slot = self.clock.current_slot().await?;
        if slot > current_slot {
            warn!(slot, current_slot, "requested future slot");
            return Err(ApiError::FutureSlot);
        }

        let block = self
            .chain
            .block_by_slot(slot)
            .await
            .map_err(|err| map_chain_error("get block", err))?;

        let total = self
            .chain
            .block_reward_total(slot)
            .await
            .map_err(|err| map_chain_error("get block rewards", err))?;

        let status = self.classify_block(&block.message.body);
        let reward = parse_reward(&total)?;

        let result = BlockReward { status, reward };
        self.cache
            .write()
            .await
            .insert(cache_key, CachedValue::BlockReward(result.clone()));

        info!(slot, status = ?result.status, reward = %result.reward, "block reward resolved");
        Ok(result)
    }

    // == Sync Committee Duties ==
    /// Resolves the sync committee membership for `slot`.
    ///
    /// Committee membership is knowable one full period ahead by chain
    /// design, so the future bound is `current_slot` plus one period rather
    /// than `current_slot` itself.
    pub async fn resolve_sync_duties(&self, slot: u64) -> Result<SyncCommitteeDuties> {
        info!(slot, "resolving sync committee duties");

        let cache_key = format!("sync_duties:{slot}");
        if let Some(CachedValue::SyncDuties(duties)) = self.cache.write().await.get(&cache_key) {
            debug!(slot, "returning cached sync duties");
            return Ok(duties);
        }

        let current_slot = self.clock.current_slot().await?;
        if slot > current_slot + SLOTS_PER_SYNC_COMMITTEE_PERIOD {
            warn!(slot, current_slot, "slot too far in future");
            return Err(ApiError::SlotTooFarInFuture);
        }

        let state_slot = sync_period_start_slot(sync_period_of_slot(slot));
        let validators = self
            .chain
            .sync_committee_validators(state_slot)
            .await
            .map_err(|err| map_chain_error("get sync committee", err))?;

        let result = SyncCommitteeDuties { validators };
        self.cache
            .write()
            .await
            .insert(cache_key, CachedValue::SyncDuties(result.clone()));

        info!(slot, validator_count = result.validators.len(), "sync duties resolved");
        Ok(result)
    }

    // == Classification ==
    /// Classifies a block's reward source from heuristic signals.
    ///
    /// Best-effort: a known transaction selector or a known relay fee
    /// recipient marks the block as MEV; absent both signals it is treated
    /// as vanilla even though a private MEV flow would be invisible here.
    fn classify_block(&self, body: &BlockBody) -> RewardStatus {
        let Some(payload) = &body.execution_payload else {
            return RewardStatus::Vanilla;
        };

        if payload.transactions.is_empty() {
            return RewardStatus::Vanilla;
        }

        if payload
            .transactions
            .iter()
            .any(|tx| self.is_mev_transaction(tx))
        {
            return RewardStatus::Mev;
        }

        if self
            .classifier
            .mev_relay_recipients
            .iter()
            .any(|relay| relay.eq_ignore_ascii_case(&payload.fee_recipient))
        {
            return RewardStatus::Mev;
        }

        RewardStatus::Vanilla
    }

    fn is_mev_transaction(&self, tx_hex: &str) -> bool {
        // "0x" prefix plus a 4-byte selector is 10 characters.
        if tx_hex.len() < 10 {
            return false;
        }

        self.classifier
            .mev_selectors
            .iter()
            .any(|selector| tx_hex.starts_with(selector.as_str()))
    }
}

// == Parsing Helpers ==
/// Parses a caller-supplied slot string as a non-negative decimal integer.
pub fn parse_slot(raw: &str) -> Result<u64> {
    raw.parse::<u64>().map_err(|source| ApiError::InvalidSlot {
        field: "slot",
        value: raw.to_string(),
        source,
    })
}

/// Parses the node's reward total as a non-negative base-10 integer.
fn parse_reward(raw: &str) -> Result<U256> {
    U256::from_dec_str(raw).map_err(|_| ApiError::MalformedReward(raw.to_string()))
}

/// Maps a transport failure into the domain taxonomy.
///
/// "Not found" stays a distinct kind: the boundary reports it as not-found
/// rather than an internal fault.
fn map_chain_error(operation: &'static str, err: BeaconError) -> ApiError {
    if err.is_not_found() {
        ApiError::SlotNotFound
    } else if err.is_timeout() {
        ApiError::Timeout { operation }
    } else {
        ApiError::ChainUnavailable {
            operation,
            source: err,
        }
    }
}
