//! Prometheus metrics for the voting ledger.

use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter, IntCounterVec,
    IntGauge,
};

/// Committed vote-allocation changes
pub static VOTE_CHANGES_APPLIED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "zentigrity_voting_changes_applied_total",
        "Total committed vote allocation changes"
    )
    .unwrap()
});

/// Rejected vote-allocation requests, by reason
pub static VOTE_CHANGES_REJECTED: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "zentigrity_voting_changes_rejected_total",
        "Total rejected vote allocation requests",
        &["reason"]
    )
    .unwrap()
});

/// Ledger finalizations
pub static LEDGERS_FINALIZED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "zentigrity_voting_ledgers_finalized_total",
        "Total ledger finalizations"
    )
    .unwrap()
});

/// Credits remaining in the open ledger
pub static CREDITS_REMAINING: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "zentigrity_voting_credits_remaining",
        "Spendable credits remaining in the open ledger"
    )
    .unwrap()
});
