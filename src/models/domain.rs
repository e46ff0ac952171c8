//! Domain result types
//!
//! The two results the resolution service produces. Both are immutable once
//! constructed: built fresh per resolution or returned verbatim from cache.

use primitive_types::U256;
use serde::{Deserialize, Serialize, Serializer};

// == Reward Status ==
/// Heuristic classification of a block's reward source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardStatus {
    /// Block shows a known MEV signal (transaction selector or relay fee recipient)
    Mev,
    /// No MEV signal detected
    Vanilla,
}

// == Block Reward ==
/// Reward status of a proposed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockReward {
    pub status: RewardStatus,
    /// Total reward in base units, serialized as a decimal string to avoid
    /// precision loss in JSON consumers.
    #[serde(serialize_with = "serialize_decimal")]
    pub reward: U256,
}

fn serialize_decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

// == Sync Committee Duties ==
/// Sync committee membership for a slot's period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncCommitteeDuties {
    /// Validator identifiers in committee order
    pub validators: Vec<String>,
}
