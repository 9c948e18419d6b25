//! Subscription lifecycle manager.

use crate::clock::Clock;
use crate::codec;
use crate::error::{Result, SubscriptionError};
use crate::store::SubscriptionStore;
use crate::types::{
    CancelOutcome, CreateReceipt, DeleteOutcome, SubscriberId, SubscriptionRecord,
    SubscriptionStatus,
};
use tracing::debug;

/// Seconds per day, for the interval-days conversion at creation.
const SECONDS_PER_DAY: u64 = 86_400;

/// Business logic over the slot store: validation, encoding, lifecycle
/// transitions, and the running total of subscriptions ever created.
///
/// The manager performs no locking of its own. The host is expected to
/// serialize invocations; in particular the creation counter is linearizable
/// only under externally serialized execution.
pub struct SubscriptionManager<S: SubscriptionStore, C: Clock> {
    store: S,
    clock: C,

    /// Subscriptions ever created. Loaded from the store at construction,
    /// written through after every successful creation, never decremented.
    total_subscriptions: u64,
}

impl<S: SubscriptionStore, C: Clock> SubscriptionManager<S, C> {
    /// Build a manager over a store and clock, restoring the persisted
    /// creation counter.
    pub fn new(store: S, clock: C) -> Result<Self> {
        let total_subscriptions = store.load_total()?;
        Ok(Self {
            store,
            clock,
            total_subscriptions,
        })
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a subscription for `subscriber`.
    ///
    /// `amount` is in the smallest currency unit; `interval_days` is converted
    /// to seconds at creation. An existing record for the same subscriber is
    /// overwritten and counted again; creation never rejects a duplicate.
    pub fn create_subscription(
        &mut self,
        subscriber: SubscriberId,
        amount: u64,
        interval_days: u64,
    ) -> Result<CreateReceipt> {
        if amount == 0 {
            return Err(SubscriptionError::InvalidArgument(
                "amount must be greater than 0",
            ));
        }
        if interval_days == 0 {
            return Err(SubscriptionError::InvalidArgument(
                "interval must be greater than 0",
            ));
        }

        let interval_seconds = interval_days
            .checked_mul(SECONDS_PER_DAY)
            .ok_or(SubscriptionError::Overflow("interval days to seconds"))?;

        let record = SubscriptionRecord::new(amount, interval_seconds, self.clock.now());
        self.store.put(&subscriber, &codec::encode(&record))?;

        self.total_subscriptions += 1;
        self.store.persist_total(self.total_subscriptions)?;

        debug!(%subscriber, amount, interval_days, "subscription created");
        Ok(CreateReceipt { amount })
    }

    /// Report whether a record exists for `subscriber`.
    ///
    /// Existence only; stored field values are not decoded here.
    pub fn subscription_info(&self, subscriber: SubscriberId) -> SubscriptionStatus {
        if self.store.exists(&subscriber) {
            SubscriptionStatus::Found
        } else {
            SubscriptionStatus::NotFound
        }
    }

    /// Whether payment is due for `subscriber` at the current time.
    ///
    /// False for absent or inactive records. The boundary is inclusive: due
    /// at the exact instant `last_payment + interval_seconds` elapses.
    pub fn check_payment_due(&self, subscriber: SubscriberId) -> Result<bool> {
        if !self.store.exists(&subscriber) {
            return Ok(false);
        }

        let record = codec::decode(&self.store.get(&subscriber)?)?;
        record.is_due(self.clock.now())
    }

    /// Deactivate the subscription, leaving the other fields untouched.
    ///
    /// Idempotent: cancelling an already-inactive record rewrites the same
    /// inactive state.
    pub fn cancel_subscription(&self, subscriber: SubscriberId) -> Result<CancelOutcome> {
        if !self.store.exists(&subscriber) {
            return Ok(CancelOutcome::NotFound);
        }

        let mut record = codec::decode(&self.store.get(&subscriber)?)?;
        record.is_active = false;
        self.store.put(&subscriber, &codec::encode(&record))?;

        debug!(%subscriber, "subscription cancelled");
        Ok(CancelOutcome::Cancelled)
    }

    /// Total subscriptions ever created, across all subscribers.
    ///
    /// Counts creations, not active records: cancellations and deletions do
    /// not reduce it, and re-creating for the same subscriber counts again.
    pub fn total_subscriptions(&self) -> u64 {
        self.total_subscriptions
    }

    /// Free the subscriber's slot entirely. The creation counter is untouched.
    pub fn delete_subscription(&self, subscriber: SubscriberId) -> Result<DeleteOutcome> {
        if !self.store.exists(&subscriber) {
            return Ok(DeleteOutcome::NotFound);
        }

        self.store.delete(&subscriber)?;

        debug!(%subscriber, "subscription deleted");
        Ok(DeleteOutcome::Deleted)
    }
}
