//! Property-based tests for ExpenseLifecycle.
//!
//! Exhaustively walks the status graph with random record contents and roles.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use trackfest_shared::types::ExpenseId;
use uuid::Uuid;

use crate::expense::error::ExpenseError;
use crate::expense::image::ImagePayload;
use crate::expense::lifecycle::ExpenseLifecycle;
use crate::expense::types::{ExpenseRecord, ExpenseStatus, TransitionExtras};
use crate::session::Role;

/// Strategy for generating random ExpenseStatus values.
fn arb_status() -> impl Strategy<Value = ExpenseStatus> {
    prop_oneof![
        Just(ExpenseStatus::Pending),
        Just(ExpenseStatus::Approved),
        Just(ExpenseStatus::Rejected),
        Just(ExpenseStatus::PaymentCleared),
    ]
}

/// Strategy for generating random positive Decimal amounts.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating records in a given status.
fn arb_record(status: ExpenseStatus) -> impl Strategy<Value = ExpenseRecord> {
    (
        any::<u128>(),
        "[a-zA-Z ]{1,40}",
        arb_amount(),
        0i64..2_000_000_000i64,
    )
        .prop_map(move |(id, title, amount, secs)| ExpenseRecord {
            id: ExpenseId::from_uuid(Uuid::from_u128(id)),
            submitter_name: Some("Submitter".to_string()),
            title,
            amount,
            description: None,
            submitter_role: Role::Student,
            status,
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
            receipt_image: None,
            payment_proof_image: None,
        })
}

fn proof() -> ImagePayload {
    ImagePayload::from_bytes("image/jpeg", b"proof").unwrap()
}

/// Extras that satisfy field validation for `target`.
fn extras_for(target: ExpenseStatus) -> TransitionExtras {
    if target == ExpenseStatus::PaymentCleared {
        TransitionExtras::with_payment_proof(proof())
    } else {
        TransitionExtras::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every (from, to) pair: allowed edges succeed with the target status,
    /// every other pair fails with InvalidTransition for a treasurer.
    #[test]
    fn prop_transition_graph_is_enforced(
        (record, target) in arb_status().prop_flat_map(|from| (arb_record(from), arb_status()))
    ) {
        let from = record.status;
        let result = ExpenseLifecycle::plan(&record, target, extras_for(target), Some(Role::Treasurer));

        let allowed = matches!(
            (from, target),
            (ExpenseStatus::Pending, ExpenseStatus::Approved)
                | (ExpenseStatus::Pending, ExpenseStatus::Rejected)
                | (ExpenseStatus::Approved, ExpenseStatus::PaymentCleared)
        );

        if allowed {
            let update = result.unwrap();
            prop_assert_eq!(update.status, target);
        } else {
            let is_invalid_transition = matches!(
                result,
                Err(ExpenseError::InvalidTransition { from: f, to: t }) if f == from && t == target
            );
            prop_assert!(is_invalid_transition);
        }
    }

    /// Terminal statuses never transition anywhere.
    #[test]
    fn prop_terminal_statuses_are_final(
        from in prop_oneof![Just(ExpenseStatus::Rejected), Just(ExpenseStatus::PaymentCleared)],
        target in arb_status(),
    ) {
        prop_assert!(!ExpenseLifecycle::is_allowed(from, target));
    }

    /// Students never perform treasurer transitions, whatever the edge.
    #[test]
    fn prop_student_is_always_denied(
        (record, target) in arb_status().prop_flat_map(|from| (arb_record(from), arb_status()))
    ) {
        prop_assume!(target != ExpenseStatus::Pending);
        let result = ExpenseLifecycle::plan(&record, target, extras_for(target), Some(Role::Student));
        prop_assert!(matches!(result, Err(ExpenseError::PermissionDenied(_))));
    }

    /// Applying a successful plan yields the target status and keeps every
    /// other field of the record.
    #[test]
    fn prop_apply_only_touches_status_and_proof(
        (record, target) in prop_oneof![
            Just((ExpenseStatus::Pending, ExpenseStatus::Approved)),
            Just((ExpenseStatus::Pending, ExpenseStatus::Rejected)),
            Just((ExpenseStatus::Approved, ExpenseStatus::PaymentCleared)),
        ].prop_flat_map(|(from, to)| (arb_record(from), Just(to)))
    ) {
        let update = ExpenseLifecycle::plan(&record, target, extras_for(target), Some(Role::Treasurer)).unwrap();
        let mut updated = record.clone();
        updated.apply(&update);

        prop_assert_eq!(updated.status, target);
        prop_assert_eq!(updated.id, record.id);
        prop_assert_eq!(updated.amount, record.amount);
        prop_assert_eq!(&updated.title, &record.title);
        prop_assert_eq!(updated.created_at, record.created_at);
        prop_assert_eq!(
            updated.payment_proof_image.is_some(),
            target == ExpenseStatus::PaymentCleared
        );
    }
}
