use thiserror::Error;

/// Voting operation result type
pub type Result<T> = std::result::Result<T, VotingError>;

/// Voting ledger errors
#[derive(Debug, Error)]
pub enum VotingError {
    #[error("Ledger already finalized")]
    AlreadyFinalized,

    #[error("Storage error: {0}")]
    StorageError(#[from] anyhow::Error),
}
