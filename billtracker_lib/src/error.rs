//! Error types for the library layer.

use std::fmt;

/// Errors raised while reading bill data through a [`crate::TableStore`].
#[derive(Debug)]
pub enum BillTrackerError {
    /// An error from the underlying REST client.
    Api(billtracker_api::Error),
    /// A table read refused by a non-HTTP store, such as the in-memory
    /// store when a table is marked unavailable. Carries the reason.
    Store(String),
    /// A row could not be converted to or from JSON.
    Serialization(serde_json::Error),
    /// User-provided input or configuration failed validation.
    InvalidInput(String),
}

impl fmt::Display for BillTrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Store(msg) => write!(f, "Store error: {}", msg),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for BillTrackerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<billtracker_api::Error> for BillTrackerError {
    fn from(e: billtracker_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for BillTrackerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
