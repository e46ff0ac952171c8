//! Chain Position Oracle
//!
//! Converts wall-clock time and the chain's genesis time into the current
//! slot, and translates between slots, epochs and sync committee periods.
//!
//! The four protocol constants below are interdependent; changing one for a
//! different network configuration requires revisiting the others.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::beacon::ChainReader;
use crate::error::{ApiError, Result};

// == Protocol Constants ==
/// Duration of one slot in seconds
pub const SECONDS_PER_SLOT: u64 = 12;

/// Number of slots in one epoch
pub const SLOTS_PER_EPOCH: u64 = 32;

/// Number of epochs sharing one sync committee assignment
pub const EPOCHS_PER_SYNC_COMMITTEE_PERIOD: u64 = 256;

/// Number of slots in one sync committee period
pub const SLOTS_PER_SYNC_COMMITTEE_PERIOD: u64 = SLOTS_PER_EPOCH * EPOCHS_PER_SYNC_COMMITTEE_PERIOD;

// == Slot Arithmetic ==
/// Returns the epoch containing `slot`.
pub fn slot_to_epoch(slot: u64) -> u64 {
    slot / SLOTS_PER_EPOCH
}

/// Returns the sync committee period containing `epoch`.
pub fn epoch_to_sync_period(epoch: u64) -> u64 {
    epoch / EPOCHS_PER_SYNC_COMMITTEE_PERIOD
}

/// Returns the first slot of sync committee period `period`.
pub fn sync_period_start_slot(period: u64) -> u64 {
    period * SLOTS_PER_SYNC_COMMITTEE_PERIOD
}

/// Returns the sync committee period containing `slot`.
pub fn sync_period_of_slot(slot: u64) -> u64 {
    epoch_to_sync_period(slot_to_epoch(slot))
}

/// Returns the slot in progress at `now`, or None if `now` precedes genesis.
pub fn slot_at(genesis_time: u64, now: u64) -> Option<u64> {
    now.checked_sub(genesis_time)
        .map(|elapsed| elapsed / SECONDS_PER_SLOT)
}

/// Returns the current Unix timestamp in seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}

// == Chain Clock ==
/// Reports the chain's current slot from genesis time and the system clock.
pub struct ChainClock {
    chain: Arc<dyn ChainReader>,
}

impl ChainClock {
    /// Creates a new ChainClock over the given chain reader.
    pub fn new(chain: Arc<dyn ChainReader>) -> Self {
        Self { chain }
    }

    /// Fetches genesis time and computes the current slot.
    ///
    /// Fails with `ChainUnavailable` (or `Timeout`) when the genesis fetch
    /// fails and with `ClockSkew` when the system clock reads earlier than
    /// genesis.
    pub async fn current_slot(&self) -> Result<u64> {
        let genesis_time = self.chain.genesis_time().await.map_err(|err| {
            if err.is_timeout() {
                ApiError::Timeout {
                    operation: "get genesis",
                }
            } else {
                ApiError::ChainUnavailable {
                    operation: "get genesis",
                    source: err,
                }
            }
        })?;

        slot_at(genesis_time, unix_now()).ok_or(ApiError::ClockSkew)
    }
}
