//! Beacon Query - A beacon chain slot query API
//!
//! Answers block reward and sync committee questions about beacon chain
//! slots, with TTL caching and heuristic MEV classification.

pub mod api;
pub mod beacon;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::ResolverService;
pub use tasks::spawn_cleanup_task;
