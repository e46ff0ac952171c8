//! Domain and response models for the slot query API
//!
//! Domain results produced by the resolution service, and the DTOs used for
//! serializing HTTP response bodies.

pub mod domain;
pub mod responses;

// Re-export commonly used types
pub use domain::{BlockReward, RewardStatus, SyncCommitteeDuties};
pub use responses::{ApiResponse, HealthResponse, StatsResponse};
