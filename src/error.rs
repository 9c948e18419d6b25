//! Error types for the subscription ledger.

use crate::types::SubscriberId;
use thiserror::Error;

/// Main error type for ledger operations.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Arithmetic overflow: {0}")]
    Overflow(&'static str),

    #[error("No record for subscriber: {0}")]
    NotFound(SubscriberId),

    #[error("Malformed record: expected {expected} bytes, got {got}")]
    MalformedRecord { expected: usize, got: usize },

    #[error("Invalid store format: {0}")]
    InvalidFormat(String),

    #[error("Checksum mismatch: expected {expected}, got {got}")]
    ChecksumMismatch { expected: u32, got: u32 },

    #[error("Store is locked by another process")]
    Locked,
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, SubscriptionError>;
