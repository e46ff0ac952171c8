//! Beacon REST API wire types
//!
//! Serde DTOs for the response envelopes of the beacon node endpoints the
//! client consumes. Numeric fields arrive as decimal strings, per the beacon
//! API convention; unknown fields are ignored.

use serde::Deserialize;

// == Block ==
/// Envelope of `GET /eth/v1/beacon/blocks/{slot}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockResponse {
    pub data: SignedBeaconBlock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignedBeaconBlock {
    pub message: BeaconBlock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BeaconBlock {
    pub slot: String,
    #[serde(default)]
    pub proposer_index: String,
    pub body: BlockBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockBody {
    /// Absent on pre-merge blocks.
    #[serde(default)]
    pub execution_payload: Option<ExecutionPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionPayload {
    pub fee_recipient: String,
    #[serde(default)]
    pub block_hash: String,
    /// RLP-encoded transactions as 0x-prefixed hex strings.
    #[serde(default)]
    pub transactions: Vec<String>,
}

// == Block Rewards ==
/// Envelope of `GET /eth/v1/beacon/rewards/blocks/{slot}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockRewardsResponse {
    pub data: BlockRewardsData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockRewardsData {
    #[serde(default)]
    pub proposer_index: String,
    /// Total proposer reward in gwei, as a decimal string.
    pub total: String,
}

// == Sync Committee ==
/// Envelope of `GET /eth/v1/beacon/states/{state_id}/sync_committees`.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncCommitteeResponse {
    pub data: SyncCommitteeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncCommitteeData {
    /// Validator indices, in committee order.
    pub validators: Vec<String>,
}

// == Genesis ==
/// Envelope of `GET /eth/v1/beacon/genesis`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenesisResponse {
    pub data: GenesisData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenesisData {
    pub genesis_time: String,
}
