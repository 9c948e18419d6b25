//! Integration tests for the subscription lifecycle.

use subledger::{
    CancelOutcome, DeleteOutcome, ManualClock, MemoryStore, SubscriberId, SubscriptionManager,
    SubscriptionStatus, SubscriptionStore,
};

const DAY: u64 = 86_400;
const START: u64 = 1_700_000_000;

fn test_manager() -> (SubscriptionManager<MemoryStore, ManualClock>, ManualClock) {
    let clock = ManualClock::new(START);
    let manager = SubscriptionManager::new(MemoryStore::new(), clock.clone()).unwrap();
    (manager, clock)
}

fn subscriber(byte: u8) -> SubscriberId {
    SubscriberId::new([byte; 32])
}

// --- Full Scenario ---

#[test]
fn test_monthly_subscription_workflow() {
    let (mut manager, clock) = test_manager();
    let alice = subscriber(1);

    let receipt = manager.create_subscription(alice, 1_000_000, 30).unwrap();
    assert_eq!(receipt.amount, 1_000_000);
    assert_eq!(manager.subscription_info(alice), SubscriptionStatus::Found);

    // Not due before the interval elapses
    clock.advance(29 * DAY);
    assert!(!manager.check_payment_due(alice).unwrap());

    // Due exactly at the boundary
    clock.advance(DAY);
    assert!(manager.check_payment_due(alice).unwrap());

    // Cancelled records are never due, however much time passes
    assert_eq!(
        manager.cancel_subscription(alice).unwrap(),
        CancelOutcome::Cancelled
    );
    assert!(!manager.check_payment_due(alice).unwrap());
    clock.advance(365 * DAY);
    assert!(!manager.check_payment_due(alice).unwrap());

    assert_eq!(
        manager.delete_subscription(alice).unwrap(),
        DeleteOutcome::Deleted
    );
    assert_eq!(manager.subscription_info(alice), SubscriptionStatus::NotFound);
    assert_eq!(manager.total_subscriptions(), 1);
}

// --- Due-Date Evaluation ---

#[test]
fn test_due_on_never_created_subscriber() {
    let (manager, _clock) = test_manager();
    assert!(!manager.check_payment_due(subscriber(9)).unwrap());
}

#[test]
fn test_due_boundary_is_inclusive() {
    let (mut manager, clock) = test_manager();
    let bob = subscriber(2);

    manager.create_subscription(bob, 500, 1).unwrap();

    clock.set(START + DAY - 1);
    assert!(!manager.check_payment_due(bob).unwrap());

    clock.set(START + DAY);
    assert!(manager.check_payment_due(bob).unwrap());
}

#[test]
fn test_stays_due_without_mark_paid() {
    // last_payment never advances after creation, so once due, always due
    let (mut manager, clock) = test_manager();
    let bob = subscriber(2);

    manager.create_subscription(bob, 500, 1).unwrap();
    clock.advance(DAY);
    assert!(manager.check_payment_due(bob).unwrap());
    clock.advance(100 * DAY);
    assert!(manager.check_payment_due(bob).unwrap());
}

// --- Cancellation ---

#[test]
fn test_cancel_is_idempotent() {
    let (mut manager, _clock) = test_manager();
    let carol = subscriber(3);

    manager.create_subscription(carol, 250, 7).unwrap();

    assert_eq!(
        manager.cancel_subscription(carol).unwrap(),
        CancelOutcome::Cancelled
    );
    let first = manager.store().get(&carol).unwrap();

    assert_eq!(
        manager.cancel_subscription(carol).unwrap(),
        CancelOutcome::Cancelled
    );
    let second = manager.store().get(&carol).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_cancel_preserves_other_fields() {
    let (mut manager, _clock) = test_manager();
    let carol = subscriber(3);

    manager.create_subscription(carol, 250, 7).unwrap();
    let before = subledger::codec::decode(&manager.store().get(&carol).unwrap()).unwrap();

    manager.cancel_subscription(carol).unwrap();
    let after = subledger::codec::decode(&manager.store().get(&carol).unwrap()).unwrap();

    assert!(!after.is_active);
    assert_eq!(after.amount, before.amount);
    assert_eq!(after.interval_seconds, before.interval_seconds);
    assert_eq!(after.last_payment, before.last_payment);
}

#[test]
fn test_cancel_without_record() {
    let (manager, _clock) = test_manager();
    assert_eq!(
        manager.cancel_subscription(subscriber(9)).unwrap(),
        CancelOutcome::NotFound
    );
}

// --- Deletion ---

#[test]
fn test_delete_without_record() {
    let (manager, _clock) = test_manager();
    assert_eq!(
        manager.delete_subscription(subscriber(9)).unwrap(),
        DeleteOutcome::NotFound
    );
}

#[test]
fn test_delete_frees_the_slot() {
    let (mut manager, _clock) = test_manager();
    let dave = subscriber(4);

    manager.create_subscription(dave, 100, 1).unwrap();
    manager.delete_subscription(dave).unwrap();

    assert_eq!(manager.subscription_info(dave), SubscriptionStatus::NotFound);
    assert!(!manager.check_payment_due(dave).unwrap());
    assert_eq!(
        manager.delete_subscription(dave).unwrap(),
        DeleteOutcome::NotFound
    );
}

// --- Creation Counter ---

#[test]
fn test_counter_counts_creations_not_active_records() {
    let (mut manager, _clock) = test_manager();

    manager.create_subscription(subscriber(1), 100, 1).unwrap();
    manager.create_subscription(subscriber(2), 200, 2).unwrap();
    assert_eq!(manager.total_subscriptions(), 2);

    manager.cancel_subscription(subscriber(1)).unwrap();
    manager.delete_subscription(subscriber(2)).unwrap();
    assert_eq!(manager.total_subscriptions(), 2);
}

#[test]
fn test_recreate_overwrites_and_counts_again() {
    // Creation has no duplicate guard: the prior record is replaced and the
    // running total counts the creation again.
    let (mut manager, clock) = test_manager();
    let eve = subscriber(5);

    manager.create_subscription(eve, 100, 1).unwrap();
    manager.cancel_subscription(eve).unwrap();

    clock.advance(10);
    manager.create_subscription(eve, 900, 3).unwrap();

    let record = subledger::codec::decode(&manager.store().get(&eve).unwrap()).unwrap();
    assert!(record.is_active);
    assert_eq!(record.amount, 900);
    assert_eq!(record.interval_seconds, 3 * DAY);
    assert_eq!(record.last_payment, START + 10);

    assert_eq!(manager.total_subscriptions(), 2);
}

#[test]
fn test_counter_written_through_to_store() {
    let (mut manager, _clock) = test_manager();
    manager.create_subscription(subscriber(1), 100, 1).unwrap();
    manager.create_subscription(subscriber(2), 100, 1).unwrap();

    assert_eq!(manager.store().load_total().unwrap(), 2);
}

// --- Identity Isolation ---

#[test]
fn test_subscribers_do_not_interfere() {
    let (mut manager, clock) = test_manager();
    let alice = subscriber(1);
    let bob = subscriber(2);

    manager.create_subscription(alice, 100, 1).unwrap();
    manager.create_subscription(bob, 200, 10).unwrap();

    clock.advance(DAY);
    assert!(manager.check_payment_due(alice).unwrap());
    assert!(!manager.check_payment_due(bob).unwrap());

    manager.delete_subscription(alice).unwrap();
    assert_eq!(manager.subscription_info(bob), SubscriptionStatus::Found);
}
