//! Subscription slot storage.
//!
//! One slot per subscriber, keyed by identity, holding the raw encoded record.
//! The manager drives this interface; hosts supply their own backend or use
//! one of the shipped implementations ([`MemoryStore`], [`FileStore`]).
//!
//! [`FileStore`]: crate::FileStore

use crate::error::{Result, SubscriptionError};
use crate::types::SubscriberId;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Key-value slot storage for encoded subscription records, plus the global
/// creation counter persisted alongside the slots.
pub trait SubscriptionStore {
    /// Whether a slot exists for the subscriber.
    fn exists(&self, key: &SubscriberId) -> bool;

    /// Read the slot's bytes. Fails with `NotFound` if the slot is absent.
    fn get(&self, key: &SubscriberId) -> Result<Vec<u8>>;

    /// Write the slot's bytes, creating the slot or overwriting an existing one.
    fn put(&self, key: &SubscriberId, bytes: &[u8]) -> Result<()>;

    /// Free the slot. Fails with `NotFound` if the slot is absent.
    fn delete(&self, key: &SubscriberId) -> Result<()>;

    /// Read the persisted creation counter (0 if never written).
    fn load_total(&self) -> Result<u64>;

    /// Persist the creation counter.
    fn persist_total(&self, total: u64) -> Result<()>;
}

/// In-memory store for tests and embedded hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<SubscriberId, Vec<u8>>>,
    total: RwLock<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubscriptionStore for MemoryStore {
    fn exists(&self, key: &SubscriberId) -> bool {
        self.slots.read().contains_key(key)
    }

    fn get(&self, key: &SubscriberId) -> Result<Vec<u8>> {
        self.slots
            .read()
            .get(key)
            .cloned()
            .ok_or(SubscriptionError::NotFound(*key))
    }

    fn put(&self, key: &SubscriberId, bytes: &[u8]) -> Result<()> {
        self.slots.write().insert(*key, bytes.to_vec());
        Ok(())
    }

    fn delete(&self, key: &SubscriberId) -> Result<()> {
        self.slots
            .write()
            .remove(key)
            .map(|_| ())
            .ok_or(SubscriptionError::NotFound(*key))
    }

    fn load_total(&self) -> Result<u64> {
        Ok(*self.total.read())
    }

    fn persist_total(&self, total: u64) -> Result<()> {
        *self.total.write() = total;
        Ok(())
    }
}
