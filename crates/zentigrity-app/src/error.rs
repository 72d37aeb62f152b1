use thiserror::Error;

/// Application assembly result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced while constructing or tearing down the stores
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Voting error: {0}")]
    VotingError(#[from] zentigrity_voting::VotingError),

    #[error("Bid error: {0}")]
    BidError(#[from] zentigrity_bids::BidError),

    #[error("Configuration or storage error: {0}")]
    SetupError(#[from] anyhow::Error),
}
