use std::sync::Arc;
use zentigrity_storage::{MemoryStore, SnapshotStore};
use zentigrity_types::ProposalId;
use zentigrity_voting::{VoteOutcome, VotingConfig, VotingLedger, VotingStore};

fn pid(s: &str) -> ProposalId {
    ProposalId::new(s)
}

/// Core budget invariants that must ALWAYS hold in the ledger
#[test]
fn test_core_budget_invariants() {
    let mut ledger = VotingLedger::new(16);

    println!("\n=== Testing Core Budget Invariants ===");

    // Invariant 1: fresh ledger holds the whole budget
    assert_eq!(ledger.credits(), 16);
    assert_eq!(ledger.spent(), 0);
    println!("✓ Invariant 1: Fresh ledger holds the whole budget");

    // Invariant 2: credits + Σ votes² == budget after every request,
    // applied or rejected
    let proposals = [pid("BID-1"), pid("BID-2"), pid("BID-3"), pid("BID-4")];
    let requests: [(usize, u32); 12] = [
        (0, 2),
        (1, 3),
        (0, 3),
        (2, 1),
        (1, 0),
        (3, 4),
        (0, 4), // over budget at this point, must be rejected
        (2, 2),
        (3, 1),
        (0, 1),
        (1, 2),
        (2, 4), // rejected again
    ];

    for (idx, votes) in requests {
        ledger.cast_vote(&proposals[idx], votes);
        assert_eq!(
            ledger.credits() + ledger.spent(),
            16,
            "budget invariant violated after request ({idx}, {votes})"
        );
    }
    println!("✓ Invariant 2: credits + Σ votes² == 16 after every request");

    // Invariant 3: credits never exceed the budget
    assert!(ledger.credits() <= 16);
    println!("✓ Invariant 3: credits bounded by budget");

    println!("\n=== All Budget Invariants Hold ===");
}

/// The exact credit walk from the design description:
/// 16 → 12 → 7 → 0, then a rejected fifth step.
#[test]
fn test_documented_credit_walk() {
    let mut ledger = VotingLedger::new(16);
    let a = pid("BID-A");

    assert!(ledger.cast_vote(&a, 2).is_applied());
    assert_eq!(ledger.credits(), 12);

    assert!(ledger.cast_vote(&a, 3).is_applied());
    assert_eq!(ledger.credits(), 7);

    // Cost diff 16 - 9 = 7 lands exactly on zero
    assert!(ledger.cast_vote(&a, 4).is_applied());
    assert_eq!(ledger.credits(), 0);

    // A fifth vote step must be rejected, leaving state unchanged
    let outcome = ledger.cast_vote(&a, 5);
    assert!(!outcome.is_applied());
    assert_eq!(ledger.votes_for(&a), 4);
    assert_eq!(ledger.credits(), 0);
}

/// Finalization makes every mutation path a no-op.
#[test]
fn test_finalization_freezes_all_operations() {
    let mut ledger = VotingLedger::new(16);
    let a = pid("BID-A");

    ledger.cast_vote(&a, 3);
    ledger.finalize().unwrap();

    assert_eq!(ledger.cast_vote(&a, 0), VoteOutcome::Finalized);
    assert_eq!(ledger.cast_vote(&pid("BID-B"), 1), VoteOutcome::Finalized);
    assert!(ledger.reset().is_err());
    assert!(ledger.finalize().is_err());

    assert_eq!(ledger.credits(), 7);
    assert_eq!(ledger.votes_for(&a), 3);
}

/// Reset pre-submission restores exactly the initial state.
#[test]
fn test_reset_restores_exact_initial_state() {
    let mut ledger = VotingLedger::new(16);

    ledger.cast_vote(&pid("BID-A"), 3);
    ledger.cast_vote(&pid("BID-B"), 2);
    ledger.reset().unwrap();

    assert_eq!(ledger.credits(), 16);
    assert!(ledger.votes().is_empty());
    assert!(!ledger.is_submitted());
}

/// The persisted store upholds the budget invariant across restarts.
#[tokio::test]
async fn test_budget_invariant_across_restarts() {
    let storage: Arc<dyn SnapshotStore> = Arc::new(MemoryStore::new());
    let config = VotingConfig::default();

    {
        let store = VotingStore::open(&config, storage.clone()).await.unwrap();
        store.cast_vote(&pid("BID-1"), 2).await.unwrap();
        store.cast_vote(&pid("BID-2"), 3).await.unwrap();
    }

    let store = VotingStore::open(&config, storage).await.unwrap();
    let votes = store.votes().await;
    let spent: u32 = votes.values().map(|v| v * v).sum();
    assert_eq!(store.credits().await + spent, 16);
}
