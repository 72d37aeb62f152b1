//! Prometheus metrics for the bid lifecycle store.

use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec,
};

/// Bids submitted
pub static BIDS_SUBMITTED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "zentigrity_bids_submitted_total",
        "Total bids submitted"
    )
    .unwrap()
});

/// Applied lifecycle transitions
pub static BID_TRANSITIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "zentigrity_bids_transitions_total",
        "Total applied bid lifecycle transitions",
        &["from_status", "to_status"]
    )
    .unwrap()
});

/// Transition requests refused by the lifecycle guard
pub static BID_TRANSITIONS_REJECTED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "zentigrity_bids_transitions_rejected_total",
        "Total bid transition requests refused by the lifecycle guard"
    )
    .unwrap()
});

/// Escrow settlements, by outcome
pub static SETTLEMENTS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "zentigrity_bids_settlements_total",
        "Total escrow payment settlements",
        &["outcome"]
    )
    .unwrap()
});
