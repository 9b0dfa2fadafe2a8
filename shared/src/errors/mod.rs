//! Wire-level response bodies shared by the filter and the account routes

use serde::{Deserialize, Serialize};

/// Body returned for every rejected request: `{"code": int, "message": string}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable numeric code for client-side branching
    pub code: i32,

    /// Human-readable message
    pub message: String,
}

impl ErrorBody {
    /// Create a new error body
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Success envelope used by the account routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `codes::OK` for this envelope
    pub code: i32,

    /// Human-readable message
    pub message: String,

    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response carrying data
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            code: codes::OK,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Create a successful response without data
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: codes::OK,
            message: message.into(),
            data: None,
        }
    }
}

/// Stable response codes
pub mod codes {
    pub const OK: i32 = 20000;
    pub const NO_TOKEN: i32 = 50000;
    pub const INVALID_TOKEN: i32 = 50008;
    pub const SESSION_INVALIDATED: i32 = 50010;
    pub const SESSION_EXPIRED: i32 = 50014;
    pub const INVALID_CREDENTIALS: i32 = 50401;
    pub const ALREADY_LOGGED_IN: i32 = 50409;
    pub const INTERNAL_ERROR: i32 = 50500;
    pub const STORE_UNAVAILABLE: i32 = 50503;
}
