//! Core types for the subscription ledger.

use crate::error::{Result, SubscriptionError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a subscriber.
///
/// A fixed-length key supplied by the host's authentication layer. The core
/// trusts it as already verified and never re-checks authorization.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriberId(pub [u8; 32]);

impl SubscriberId {
    /// Length of the identity key in bytes.
    pub const LEN: usize = 32;

    /// Wrap raw identity bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        SubscriberId(bytes)
    }

    /// The raw identity bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| SubscriptionError::InvalidFormat(format!("bad subscriber hex: {}", e)))?;
        let arr: [u8; 32] = bytes.try_into().map_err(|_| {
            SubscriptionError::InvalidFormat("subscriber id must be 32 bytes".into())
        })?;
        Ok(SubscriberId(arr))
    }

    /// First byte of the hex form (for sharding slot files).
    pub fn shard_prefix(&self) -> String {
        hex::encode(&self.0[0..1])
    }
}

impl fmt::Debug for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriberId({}...)", &self.to_hex()[..8])
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Decoded subscription state for one subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    /// Payment amount in the smallest currency unit. Greater than zero at creation.
    pub amount: u64,

    /// Payment interval in seconds. Greater than zero.
    pub interval_seconds: u64,

    /// Unix timestamp of the last recorded payment. Set to creation time;
    /// never advanced afterwards (there is no mark-paid operation), so an
    /// active record stays due once its first interval elapses.
    pub last_payment: u64,

    /// Whether the subscription is active.
    pub is_active: bool,
}

impl SubscriptionRecord {
    /// Build a fresh active record with `last_payment` set to `now`.
    pub fn new(amount: u64, interval_seconds: u64, now: u64) -> Self {
        Self {
            amount,
            interval_seconds,
            last_payment: now,
            is_active: true,
        }
    }

    /// The instant the next payment falls due.
    pub fn next_payment_time(&self) -> Result<u64> {
        self.last_payment
            .checked_add(self.interval_seconds)
            .ok_or(SubscriptionError::Overflow("next payment time"))
    }

    /// Whether payment is due at `now`. Inactive records are never due; the
    /// boundary is inclusive (due at the exact instant the interval elapses).
    pub fn is_due(&self, now: u64) -> Result<bool> {
        if !self.is_active {
            return Ok(false);
        }
        Ok(now >= self.next_payment_time()?)
    }
}

/// Confirmation returned by a successful creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReceipt {
    /// Amount recorded on the new subscription.
    pub amount: u64,
}

impl fmt::Display for CreateReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subscription created! Amount: {}", self.amount)
    }
}

/// Existence status reported by an info query.
///
/// Only existence is guaranteed; field values are not exposed here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    Found,
    NotFound,
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionStatus::Found => {
                write!(f, "Subscription found! Use check_payment_due to see status")
            }
            SubscriptionStatus::NotFound => write!(f, "No subscription found for this address"),
        }
    }
}

/// Outcome of a cancellation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelOutcome {
    Cancelled,
    NotFound,
}

impl fmt::Display for CancelOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelOutcome::Cancelled => write!(f, "Subscription cancelled successfully!"),
            CancelOutcome::NotFound => write!(f, "No active subscription found"),
        }
    }
}

/// Outcome of a deletion request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

impl fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteOutcome::Deleted => write!(f, "Subscription deleted successfully!"),
            DeleteOutcome::NotFound => write!(f, "No subscription to delete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> SubscriberId {
        SubscriberId::new([byte; 32])
    }

    #[test]
    fn test_subscriber_hex_roundtrip() {
        let subscriber = id(0xab);
        let hex = subscriber.to_hex();
        let parsed = SubscriberId::from_hex(&hex).unwrap();
        assert_eq!(subscriber, parsed);
    }

    #[test]
    fn test_subscriber_from_bad_hex() {
        assert!(SubscriberId::from_hex("not hex").is_err());
        assert!(SubscriberId::from_hex("abcd").is_err());
    }

    #[test]
    fn test_shard_prefix() {
        let subscriber = id(0x7f);
        assert_eq!(subscriber.shard_prefix(), "7f");
    }

    #[test]
    fn test_due_boundary_inclusive() {
        let record = SubscriptionRecord::new(500, 100, 1_000);
        assert!(!record.is_due(1_099).unwrap());
        assert!(record.is_due(1_100).unwrap());
        assert!(record.is_due(2_000).unwrap());
    }

    #[test]
    fn test_inactive_never_due() {
        let mut record = SubscriptionRecord::new(500, 100, 1_000);
        record.is_active = false;
        assert!(!record.is_due(u64::MAX).unwrap());
    }

    #[test]
    fn test_next_payment_overflow() {
        let record = SubscriptionRecord::new(500, u64::MAX, 10);
        assert!(matches!(
            record.next_payment_time(),
            Err(SubscriptionError::Overflow(_))
        ));
    }
}
