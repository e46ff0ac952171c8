//! Beacon Node Module
//!
//! The chain data collaborator: wire types for the beacon REST API and an
//! HTTP client exposing the four fetch operations the resolution layer needs.

pub mod client;
pub mod types;

pub use client::{BeaconApiClient, BeaconError, ChainReader};
pub use types::{
    BeaconBlock, BlockBody, ExecutionPayload, GenesisData, SignedBeaconBlock, SyncCommitteeData,
};
