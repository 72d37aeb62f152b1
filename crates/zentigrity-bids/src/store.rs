use crate::types::{Bid, BidBookSnapshot, BidDraft, BidStatus};
use crate::{metrics, BidError, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use zentigrity_storage::{codec, SnapshotStore};
use zentigrity_types::{BidId, LifecycleState};

/// Fixed storage key the bid book snapshot lives under.
pub const BID_STORAGE_KEY: &str = "bid-storage";

/// Persistent store of every bid ever submitted.
///
/// Records bids, moves them through the approval workflow and marks
/// terminal payment status. Transitions are validated against
/// [`BidStatus`]'s lifecycle relation; an incompatible current status is
/// reported as [`BidError::InvalidTransition`] rather than silently
/// applied. Bids are never deleted.
pub struct BidStore {
    bids: RwLock<Vec<Bid>>,
    storage: Arc<dyn SnapshotStore>,
}

impl BidStore {
    /// Hydrate the store from persisted state, defaulting to an empty bid
    /// book when the snapshot is absent or malformed.
    pub async fn open(storage: Arc<dyn SnapshotStore>) -> Result<Self> {
        let blob = storage.get(BID_STORAGE_KEY).await?;
        let snapshot: BidBookSnapshot = codec::decode_or_default(BID_STORAGE_KEY, blob.as_deref());

        info!(bids = snapshot.bids.len(), "Bid book hydrated");

        Ok(Self {
            bids: RwLock::new(snapshot.bids),
            storage,
        })
    }

    /// Record a new bid. Always succeeds; duplicate bidder/task pairs are
    /// permitted and distinct.
    pub async fn add_bid(&self, draft: BidDraft) -> Result<BidId> {
        let mut bids = self.bids.write().await;

        let timestamp = Utc::now();
        // Time-based id; bump past collisions from same-millisecond submissions
        let mut millis = timestamp.timestamp_millis();
        while bids
            .iter()
            .any(|b| b.id == BidId::from_timestamp_millis(millis))
        {
            millis += 1;
        }
        let id = BidId::from_timestamp_millis(millis);

        let bid = Bid {
            id: id.clone(),
            task_id: draft.task_id,
            task_title: draft.task_title,
            amount: draft.amount,
            days: draft.days,
            proposal: draft.proposal,
            bidder: draft.bidder,
            wallet: draft.wallet,
            timestamp,
            deadline: draft.deadline,
            status: BidStatus::Pending,
            escrow_index: None,
            paid: false,
        };

        info!(
            bid_id = %bid.id,
            task_id = %bid.task_id,
            bidder = %bid.bidder,
            amount = %bid.amount,
            days = bid.days,
            "Bid submitted"
        );
        metrics::BIDS_SUBMITTED.inc();

        bids.push(bid);
        self.persist(&bids).await?;
        Ok(id)
    }

    /// Approve a pending bid, attaching the escrow index supplied by the
    /// caller. The index is a reference into the external escrow
    /// contract's lock array and is not validated here.
    pub async fn approve_bid(&self, bid_id: &BidId, escrow_index: u64) -> Result<()> {
        let mut bids = self.bids.write().await;
        let bid = Self::transition(&mut bids, bid_id, BidStatus::Approved)?;

        bid.escrow_index = Some(escrow_index);
        bid.paid = false;

        info!(
            bid_id = %bid_id,
            escrow_index = escrow_index,
            "✅ Bid approved"
        );

        self.persist(&bids).await
    }

    /// Reject a pending bid.
    pub async fn reject_bid(&self, bid_id: &BidId) -> Result<()> {
        let mut bids = self.bids.write().await;
        Self::transition(&mut bids, bid_id, BidStatus::Rejected)?;

        info!(bid_id = %bid_id, "Bid rejected");

        self.persist(&bids).await
    }

    /// Mark an approved bid completed and paid.
    ///
    /// Single terminal-payment operation; callers invoke it after the
    /// external escrow withdrawal confirms (see the settlement module).
    pub async fn complete_bid(&self, bid_id: &BidId) -> Result<()> {
        let mut bids = self.bids.write().await;
        let bid = Self::transition(&mut bids, bid_id, BidStatus::Completed)?;

        bid.paid = true;

        info!(bid_id = %bid_id, "Bid completed, payment recorded");

        self.persist(&bids).await
    }

    pub async fn get(&self, bid_id: &BidId) -> Option<Bid> {
        let bids = self.bids.read().await;
        bids.iter().find(|b| &b.id == bid_id).cloned()
    }

    /// Every bid ever submitted, in submission order.
    pub async fn all_bids(&self) -> Vec<Bid> {
        let bids = self.bids.read().await;
        bids.clone()
    }

    pub async fn bids_by_status(&self, status: BidStatus) -> Vec<Bid> {
        let bids = self.bids.read().await;
        bids.iter().filter(|b| b.status == status).cloned().collect()
    }

    /// Write the current snapshot through to storage.
    pub async fn flush(&self) -> Result<()> {
        let bids = self.bids.read().await;
        self.persist(&bids).await?;
        self.storage.flush().await?;
        Ok(())
    }

    /// Apply a guarded status transition and return the mutated bid.
    fn transition<'a>(
        bids: &'a mut [Bid],
        bid_id: &BidId,
        to: BidStatus,
    ) -> Result<&'a mut Bid> {
        let bid = bids
            .iter_mut()
            .find(|b| &b.id == bid_id)
            .ok_or_else(|| BidError::BidNotFound(bid_id.to_string()))?;

        if !bid.status.can_transition_to(&to) {
            metrics::BID_TRANSITIONS_REJECTED.inc();
            return Err(BidError::InvalidTransition {
                from: bid.status,
                to,
            });
        }

        let from = bid.status;
        bid.status = to;

        metrics::BID_TRANSITIONS
            .with_label_values(&[from.to_string().as_str(), to.to_string().as_str()])
            .inc();

        Ok(bid)
    }

    async fn persist(&self, bids: &[Bid]) -> Result<()> {
        let snapshot = BidBookSnapshot {
            bids: bids.to_vec(),
        };
        let blob = codec::encode(&snapshot)?;
        self.storage.put(BID_STORAGE_KEY, blob).await?;
        debug!(
            key = BID_STORAGE_KEY,
            bids = bids.len(),
            "Bid book snapshot persisted"
        );
        Ok(())
    }
}
