use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use zentigrity_types::ProposalId;

/// Default spendable credit budget per member.
pub const DEFAULT_CREDIT_BUDGET: u32 = 16;

/// Default length of a voting period in days.
pub const DEFAULT_VOTING_PERIOD_DAYS: u32 = 7;

/// Voting ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotingConfig {
    /// Spendable credit budget each member starts with
    pub credit_budget: u32,
    /// Days a ballot stays open
    pub voting_period_days: u32,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            credit_budget: DEFAULT_CREDIT_BUDGET,
            voting_period_days: DEFAULT_VOTING_PERIOD_DAYS,
        }
    }
}

/// Proposal on the ballot, derived from an approved bid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    pub description: String,
    /// Days remaining in the voting period
    pub days_left: u32,
}

/// Outcome of a vote-change request.
///
/// An over-budget or post-finalization request is a rejected-but-valid
/// request, not an error; the ledger stays unchanged and reports why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The change was committed
    Applied { credits_remaining: u32 },
    /// Committing would overdraw the credit budget
    InsufficientCredits { required: u32, available: u32 },
    /// The ledger is finalized; no further mutation is possible
    Finalized,
}

impl VoteOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Whole-ledger persistence snapshot.
///
/// This is the exact JSON shape written under the `voting-storage` key;
/// keep it decoupled from the live ledger so the wire format is explicit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub credits: u32,
    pub votes: HashMap<ProposalId, u32>,
    pub submitted: bool,
}

impl LedgerSnapshot {
    /// Initial state for a fresh member with the given budget.
    pub fn initial(credit_budget: u32) -> Self {
        Self {
            credits: credit_budget,
            votes: HashMap::new(),
            submitted: false,
        }
    }
}

impl Default for LedgerSnapshot {
    fn default() -> Self {
        Self::initial(DEFAULT_CREDIT_BUDGET)
    }
}

/// Per-proposal tally row backing the results view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalTally {
    pub proposal_id: ProposalId,
    pub votes: u32,
    /// Credits spent on this proposal (votes squared)
    pub cost: u32,
}
