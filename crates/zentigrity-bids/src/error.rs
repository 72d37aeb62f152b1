use crate::types::BidStatus;
use thiserror::Error;

/// Bid store operation result type
pub type Result<T> = std::result::Result<T, BidError>;

/// Bid lifecycle errors
#[derive(Debug, Error)]
pub enum BidError {
    #[error("Bid not found: {0}")]
    BidNotFound(String),

    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition { from: BidStatus, to: BidStatus },

    #[error("Bid {0} has no escrow index")]
    EscrowIndexMissing(String),

    #[error("Escrow withdrawal failed: {0}")]
    WithdrawalFailed(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] anyhow::Error),
}
