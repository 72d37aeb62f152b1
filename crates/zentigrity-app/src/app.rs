use crate::config::{StorageBackend, ZentigrityConfig};
use crate::error::Result;
use std::sync::Arc;
use tracing::info;
use zentigrity_bids::{BidStatus, BidStore};
use zentigrity_storage::{FileStore, MemoryStore, SnapshotStore};
use zentigrity_voting::{Proposal, VotingStore};
use zentigrity_types::ProposalId;

/// Handle owning both stores over one injected storage backend.
///
/// Construction hydrates both stores from their snapshots; teardown
/// flushes them. There are no ambient singletons: everything the stores
/// need is passed in here.
pub struct Zentigrity {
    voting: Arc<VotingStore>,
    bids: Arc<BidStore>,
    storage: Arc<dyn SnapshotStore>,
    voting_period_days: u32,
}

impl Zentigrity {
    /// Build the storage backend from config and hydrate both stores.
    pub async fn init(config: &ZentigrityConfig) -> Result<Self> {
        let storage: Arc<dyn SnapshotStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::File => Arc::new(FileStore::new(&config.storage.data_dir)?),
        };

        Self::with_storage(config, storage).await
    }

    /// Hydrate both stores over an already-constructed backend.
    pub async fn with_storage(
        config: &ZentigrityConfig,
        storage: Arc<dyn SnapshotStore>,
    ) -> Result<Self> {
        let voting = Arc::new(VotingStore::open(&config.voting, storage.clone()).await?);
        let bids = Arc::new(BidStore::open(storage.clone()).await?);

        info!(
            backend = ?config.storage.backend,
            credit_budget = config.voting.credit_budget,
            "Zentigrity stores initialized"
        );

        Ok(Self {
            voting,
            bids,
            storage,
            voting_period_days: config.voting.voting_period_days,
        })
    }

    pub fn voting(&self) -> &Arc<VotingStore> {
        &self.voting
    }

    pub fn bids(&self) -> &Arc<BidStore> {
        &self.bids
    }

    pub fn storage(&self) -> &Arc<dyn SnapshotStore> {
        &self.storage
    }

    /// Repopulate the ballot from the current approved bids.
    ///
    /// Full replace, idempotent; call whenever the approved set changes.
    /// Returns the number of proposals on the ballot.
    pub async fn refresh_proposals(&self) -> Result<usize> {
        let approved = self.bids.bids_by_status(BidStatus::Approved).await;
        let proposals: Vec<Proposal> = approved
            .iter()
            .map(|bid| Proposal {
                id: ProposalId::from(&bid.id),
                title: bid.task_title.clone(),
                description: bid.proposal.clone(),
                days_left: self.voting_period_days,
            })
            .collect();

        let count = proposals.len();
        self.voting.load_proposals(proposals).await;

        info!(proposals = count, "Ballot refreshed from approved bids");
        Ok(count)
    }

    /// Flush both snapshots. Call before dropping the handle.
    pub async fn shutdown(&self) -> Result<()> {
        self.voting.flush().await?;
        self.bids.flush().await?;
        info!("Zentigrity stores flushed");
        Ok(())
    }
}
