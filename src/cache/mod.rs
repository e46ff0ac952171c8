//! Cache Module
//!
//! Provides in-memory caching with per-entry TTL expiration and a capacity
//! bound enforced by earliest-expiry eviction.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use stats::CacheStats;
pub use store::CacheStore;
