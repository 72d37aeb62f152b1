use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zentigrity_types::{Amount, BidId, LifecycleState, TaskId, WalletAddress};

/// Bid lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    /// Submitted, awaiting DAO review
    Pending,
    /// Accepted; escrow funded, work may start
    Approved,
    /// Declined by the DAO
    Rejected,
    /// Escrow withdrawn, worker paid
    Completed,
}

impl LifecycleState for BidStatus {
    fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }

    fn can_transition_to(&self, next: &Self) -> bool {
        use BidStatus::*;
        match (self, next) {
            // From Pending
            (Pending, Approved) => true,
            (Pending, Rejected) => true,

            // From Approved
            (Approved, Completed) => true,

            // Terminal states cannot transition; nothing reverses
            _ => false,
        }
    }
}

impl std::fmt::Display for BidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        };
        write!(f, "{}", label)
    }
}

/// A worker's proposal to complete a task for a stated amount and window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub id: BidId,
    pub task_id: TaskId,
    pub task_title: String,
    pub amount: Amount,
    /// Proposed completion window in days
    pub days: u32,
    /// Free-text resolution proposal
    pub proposal: String,
    pub bidder: String,
    pub wallet: WalletAddress,
    pub timestamp: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub status: BidStatus,
    /// Index into the external escrow contract's lock array; set at
    /// approval time, never validated against the chain here
    pub escrow_index: Option<u64>,
    pub paid: bool,
}

/// Caller-supplied fields of a new bid; the store assigns id and status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidDraft {
    pub task_id: TaskId,
    pub task_title: String,
    pub amount: Amount,
    pub days: u32,
    pub proposal: String,
    pub bidder: String,
    pub wallet: WalletAddress,
    pub deadline: DateTime<Utc>,
}

/// Whole-store persistence snapshot: the full bid history, in submission
/// order. Bids are never deleted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BidBookSnapshot {
    pub bids: Vec<Bid>,
}
