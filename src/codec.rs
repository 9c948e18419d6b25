//! Fixed-width binary codec for subscription records.
//!
//! A record is exactly 25 bytes, big-endian fields at fixed offsets:
//!
//! ```text
//! amount(8) | interval_seconds(8) | last_payment(8) | is_active(1)
//! ```
//!
//! Readers decode by byte offset; there is no self-describing framing and no
//! version field, so the layout itself is the contract.

use crate::error::{Result, SubscriptionError};
use crate::types::SubscriptionRecord;

/// Size of an encoded record in bytes.
pub const RECORD_SIZE: usize = 25;

/// Marker byte for an active record. Any other flag value decodes as inactive.
const ACTIVE_MARKER: u8 = 0x01;

/// Encode a record into its fixed 25-byte layout.
pub fn encode(record: &SubscriptionRecord) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    buf[0..8].copy_from_slice(&record.amount.to_be_bytes());
    buf[8..16].copy_from_slice(&record.interval_seconds.to_be_bytes());
    buf[16..24].copy_from_slice(&record.last_payment.to_be_bytes());
    buf[24] = if record.is_active { ACTIVE_MARKER } else { 0x00 };
    buf
}

/// Decode a 25-byte buffer into a record.
///
/// Fails with `MalformedRecord` if the length is wrong. The core never writes
/// malformed records itself, so a failure here means storage corruption.
pub fn decode(bytes: &[u8]) -> Result<SubscriptionRecord> {
    if bytes.len() != RECORD_SIZE {
        return Err(SubscriptionError::MalformedRecord {
            expected: RECORD_SIZE,
            got: bytes.len(),
        });
    }

    let amount = u64::from_be_bytes(bytes[0..8].try_into().expect("8-byte slice"));
    let interval_seconds = u64::from_be_bytes(bytes[8..16].try_into().expect("8-byte slice"));
    let last_payment = u64::from_be_bytes(bytes[16..24].try_into().expect("8-byte slice"));
    let is_active = bytes[24] == ACTIVE_MARKER;

    Ok(SubscriptionRecord {
        amount,
        interval_seconds,
        last_payment,
        is_active,
    })
}
