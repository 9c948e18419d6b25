//! # Subledger
//!
//! Per-subscriber recurring-payment metadata on a key-value slot store.
//!
//! ## Core Concepts
//!
//! - **Records**: Fixed 25-byte encodings of one subscriber's payment schedule
//! - **Slots**: One key-value storage unit per subscriber identity
//! - **Manager**: Lifecycle state machine (create, due-check, cancel, delete)
//!   plus a running total of subscriptions ever created
//! - **Clock**: Injected time source for due-date evaluation
//!
//! The host environment owns transaction dispatch and caller authentication;
//! the manager takes the already-verified [`SubscriberId`] explicitly and
//! relies on the host to serialize invocations.
//!
//! ## Example
//!
//! ```
//! use subledger::{ManualClock, MemoryStore, SubscriberId, SubscriptionManager};
//!
//! # fn main() -> subledger::Result<()> {
//! let clock = ManualClock::new(1_700_000_000);
//! let mut manager = SubscriptionManager::new(MemoryStore::new(), clock.clone())?;
//!
//! let subscriber = SubscriberId::new([7; 32]);
//! manager.create_subscription(subscriber, 1_000_000, 30)?;
//!
//! assert!(!manager.check_payment_due(subscriber)?);
//! clock.advance(30 * 86_400);
//! assert!(manager.check_payment_due(subscriber)?);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod codec;
pub mod error;
pub mod file_store;
pub mod manager;
pub mod store;
pub mod types;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::RECORD_SIZE;
pub use error::{Result, SubscriptionError};
pub use file_store::FileStore;
pub use manager::SubscriptionManager;
pub use store::{MemoryStore, SubscriptionStore};
pub use types::{
    CancelOutcome, CreateReceipt, DeleteOutcome, SubscriberId, SubscriptionRecord,
    SubscriptionStatus,
};
