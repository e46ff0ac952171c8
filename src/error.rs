//! Error types for the slot query service
//!
//! Provides the domain error taxonomy using thiserror, classification
//! predicates for the boundary layer, and the HTTP status mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::beacon::BeaconError;

// == Api Error Enum ==
/// Unified error type for the slot query service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Slot is in range but the chain has no data for it (missed slot)
    #[error("slot not found")]
    SlotNotFound,

    /// Requested slot has not occurred yet
    #[error("requested slot is in the future")]
    FutureSlot,

    /// Requested slot's sync committee period is not knowable yet
    #[error("requested slot is too far in the future")]
    SlotTooFarInFuture,

    /// Malformed caller-supplied slot value
    #[error("invalid value {value:?} for {field}")]
    InvalidSlot {
        field: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Beacon node transport failure
    #[error("beacon node unavailable during {operation}")]
    ChainUnavailable {
        operation: &'static str,
        #[source]
        source: BeaconError,
    },

    /// Beacon node request exceeded its deadline
    #[error("beacon node request timed out during {operation}")]
    Timeout { operation: &'static str },

    /// System clock reads earlier than the chain's genesis time
    #[error("system clock is before genesis time")]
    ClockSkew,

    /// Upstream returned an unparseable reward value
    #[error("malformed reward value: {0:?}")]
    MalformedReward(String),
}

// == Classification Predicates ==
impl ApiError {
    /// True for errors the boundary should report as not-found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::SlotNotFound)
    }

    /// True for errors caused by the caller's input.
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            ApiError::FutureSlot | ApiError::SlotTooFarInFuture | ApiError::InvalidSlot { .. }
        )
    }

    /// True when the upstream call exceeded its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout { .. })
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.is_not_found() {
            StatusCode::NOT_FOUND
        } else if self.is_bad_request() {
            StatusCode::BAD_REQUEST
        } else if self.is_timeout() {
            StatusCode::GATEWAY_TIMEOUT
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the slot query service.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn invalid_slot(raw: &str) -> ApiError {
        let source = raw.parse::<u64>().unwrap_err();
        ApiError::InvalidSlot {
            field: "slot",
            value: raw.to_string(),
            source,
        }
    }

    #[test]
    fn test_not_found_classification() {
        assert!(ApiError::SlotNotFound.is_not_found());
        assert!(!ApiError::SlotNotFound.is_bad_request());
        assert!(!ApiError::SlotNotFound.is_timeout());
    }

    #[test]
    fn test_bad_request_classification() {
        assert!(ApiError::FutureSlot.is_bad_request());
        assert!(ApiError::SlotTooFarInFuture.is_bad_request());
        assert!(invalid_slot("abc").is_bad_request());
        assert!(!ApiError::MalformedReward("x".to_string()).is_bad_request());
    }

    #[test]
    fn test_timeout_classification() {
        let err = ApiError::Timeout {
            operation: "get block",
        };
        assert!(err.is_timeout());
        assert!(!err.is_bad_request());
    }

    #[test]
    fn test_invalid_slot_carries_field_and_value() {
        let err = invalid_slot("12x45");
        let message = err.to_string();
        assert!(message.contains("slot"));
        assert!(message.contains("12x45"));
    }

    #[test]
    fn test_invalid_slot_unwraps_to_cause() {
        let err = invalid_slot("abc");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_chain_unavailable_unwraps_to_cause() {
        let err = ApiError::ChainUnavailable {
            operation: "get block",
            source: BeaconError::NotFound,
        };
        assert!(err.source().is_some());
    }
}
