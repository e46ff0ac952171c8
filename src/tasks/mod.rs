//! Background Tasks Module
//!
//! Long-lived tasks that run alongside the HTTP server.

pub mod cleanup;

pub use cleanup::{spawn_cleanup_task, ReaperHandle};
