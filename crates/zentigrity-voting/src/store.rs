use crate::ledger::VotingLedger;
use crate::types::{LedgerSnapshot, Proposal, ProposalTally, VoteOutcome, VotingConfig};
use crate::{metrics, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use zentigrity_storage::{codec, SnapshotStore};
use zentigrity_types::ProposalId;

/// Fixed storage key the ledger snapshot lives under.
pub const VOTING_STORAGE_KEY: &str = "voting-storage";

/// Persistent wrapper around [`VotingLedger`].
///
/// Holds the ledger behind a write lock so each mutation is atomic, and
/// writes the whole snapshot through to the injected [`SnapshotStore`]
/// after every committed change. Last writer wins; there is no cross-device
/// merge.
pub struct VotingStore {
    ledger: RwLock<VotingLedger>,
    storage: Arc<dyn SnapshotStore>,
}

impl VotingStore {
    /// Hydrate a store from persisted state, defaulting to the initial
    /// ledger when the snapshot is absent or malformed.
    pub async fn open(config: &VotingConfig, storage: Arc<dyn SnapshotStore>) -> Result<Self> {
        let blob = storage.get(VOTING_STORAGE_KEY).await?;
        let snapshot = codec::decode_or(
            VOTING_STORAGE_KEY,
            blob.as_deref(),
            LedgerSnapshot::initial(config.credit_budget),
        );

        info!(
            credits = snapshot.credits,
            proposals_voted = snapshot.votes.len(),
            submitted = snapshot.submitted,
            "Voting ledger hydrated"
        );

        let ledger = VotingLedger::from_snapshot(config.credit_budget, snapshot);
        metrics::CREDITS_REMAINING.set(ledger.credits() as i64);

        Ok(Self {
            ledger: RwLock::new(ledger),
            storage,
        })
    }

    /// Replace the proposal set from the current approved bids.
    pub async fn load_proposals(&self, proposals: Vec<Proposal>) {
        let mut ledger = self.ledger.write().await;
        ledger.load_proposals(proposals);
    }

    pub async fn proposals(&self) -> Vec<Proposal> {
        let ledger = self.ledger.read().await;
        ledger.proposals().to_vec()
    }

    /// Request a vote-count change and persist on commit.
    pub async fn cast_vote(&self, proposal_id: &ProposalId, new_votes: u32) -> Result<VoteOutcome> {
        let mut ledger = self.ledger.write().await;
        let outcome = ledger.cast_vote(proposal_id, new_votes);

        match outcome {
            VoteOutcome::Applied { credits_remaining } => {
                metrics::VOTE_CHANGES_APPLIED.inc();
                metrics::CREDITS_REMAINING.set(credits_remaining as i64);
                self.persist(&ledger).await?;
            }
            VoteOutcome::InsufficientCredits { .. } => {
                metrics::VOTE_CHANGES_REJECTED
                    .with_label_values(&["insufficient_credits"])
                    .inc();
            }
            VoteOutcome::Finalized => {
                metrics::VOTE_CHANGES_REJECTED
                    .with_label_values(&["finalized"])
                    .inc();
            }
        }

        Ok(outcome)
    }

    /// Restore the initial allocation. Valid only pre-submission.
    pub async fn reset(&self) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        ledger.reset()?;
        metrics::CREDITS_REMAINING.set(ledger.credits() as i64);
        self.persist(&ledger).await
    }

    /// Lock the allocation permanently and persist the locked state.
    pub async fn finalize(&self) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        ledger.finalize()?;
        metrics::LEDGERS_FINALIZED.inc();
        self.persist(&ledger).await
    }

    pub async fn tally(&self) -> Vec<ProposalTally> {
        let ledger = self.ledger.read().await;
        ledger.tally()
    }

    pub async fn credits(&self) -> u32 {
        let ledger = self.ledger.read().await;
        ledger.credits()
    }

    pub async fn votes(&self) -> HashMap<ProposalId, u32> {
        let ledger = self.ledger.read().await;
        ledger.votes().clone()
    }

    pub async fn is_submitted(&self) -> bool {
        let ledger = self.ledger.read().await;
        ledger.is_submitted()
    }

    /// Write the current snapshot through to storage.
    pub async fn flush(&self) -> Result<()> {
        let ledger = self.ledger.read().await;
        self.persist(&ledger).await?;
        self.storage.flush().await?;
        Ok(())
    }

    async fn persist(&self, ledger: &VotingLedger) -> Result<()> {
        let blob = codec::encode(&ledger.snapshot())?;
        self.storage.put(VOTING_STORAGE_KEY, blob).await?;
        debug!(
            key = VOTING_STORAGE_KEY,
            credits = ledger.credits(),
            submitted = ledger.is_submitted(),
            "Ledger snapshot persisted"
        );
        Ok(())
    }
}
