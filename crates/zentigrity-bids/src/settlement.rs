//! Two-phase escrow payment settlement.
//!
//! Releasing a worker's payment is a two-phase operation: (1) withdraw
//! from the external escrow contract and await confirmation, (2) on
//! success, mark the bid completed in the store. A failed withdrawal
//! leaves the bid untouched; there is no compensation or automatic
//! retry, the caller may simply re-invoke.

use crate::store::BidStore;
use crate::types::BidStatus;
use crate::{metrics, BidError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use zentigrity_types::BidId;

/// Confirmation receipt for an on-chain escrow withdrawal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: String,
}

/// Seam to the externally-owned escrow contract.
///
/// `withdraw` must resolve only once the withdrawal transaction is
/// confirmed; implementations wrap whatever chain client the deployment
/// uses.
#[async_trait]
pub trait EscrowGateway: Send + Sync {
    async fn withdraw(&self, escrow_index: u64) -> anyhow::Result<TxReceipt>;
}

/// Drives payment settlement against the escrow gateway.
pub struct SettlementEngine {
    store: Arc<BidStore>,
    gateway: Arc<dyn EscrowGateway>,
}

impl SettlementEngine {
    pub fn new(store: Arc<BidStore>, gateway: Arc<dyn EscrowGateway>) -> Self {
        Self { store, gateway }
    }

    /// Withdraw the bid's escrow lock and, on confirmation, mark the bid
    /// completed and paid.
    pub async fn settle(&self, bid_id: &BidId) -> Result<TxReceipt> {
        let bid = self
            .store
            .get(bid_id)
            .await
            .ok_or_else(|| BidError::BidNotFound(bid_id.to_string()))?;

        if bid.status != BidStatus::Approved {
            return Err(BidError::InvalidTransition {
                from: bid.status,
                to: BidStatus::Completed,
            });
        }

        let escrow_index = bid
            .escrow_index
            .ok_or_else(|| BidError::EscrowIndexMissing(bid_id.to_string()))?;

        // Phase 1: on-chain withdrawal. Nothing in the store changes until
        // the transaction confirms.
        let receipt = match self.gateway.withdraw(escrow_index).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(
                    bid_id = %bid_id,
                    escrow_index = escrow_index,
                    error = %e,
                    "Escrow withdrawal failed, bid left untouched"
                );
                metrics::SETTLEMENTS.with_label_values(&["failed"]).inc();
                return Err(BidError::WithdrawalFailed(e.to_string()));
            }
        };

        // Phase 2: record completion.
        self.store.complete_bid(bid_id).await?;

        info!(
            bid_id = %bid_id,
            escrow_index = escrow_index,
            tx_hash = %receipt.tx_hash,
            "💸 Payment settled"
        );
        metrics::SETTLEMENTS.with_label_values(&["settled"]).inc();

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BidDraft;
    use chrono::{Duration, Utc};
    use std::sync::atomic::{AtomicU32, Ordering};
    use zentigrity_storage::MemoryStore;
    use zentigrity_types::{Amount, TaskId, WalletAddress};

    struct MockGateway {
        fail: bool,
        calls: AtomicU32,
    }

    impl MockGateway {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl EscrowGateway for MockGateway {
        async fn withdraw(&self, escrow_index: u64) -> anyhow::Result<TxReceipt> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("execution reverted");
            }
            Ok(TxReceipt {
                tx_hash: format!("0xabc{}", escrow_index),
            })
        }
    }

    fn draft() -> BidDraft {
        BidDraft {
            task_id: TaskId::new("GRV-1"),
            task_title: "Pothole repair".to_string(),
            amount: Amount::from_units(1800.0),
            days: 10,
            proposal: "Resurface the junction".to_string(),
            bidder: "worker-3".to_string(),
            wallet: WalletAddress::from_bytes([0x11; 20]),
            deadline: Utc::now() + Duration::days(15),
        }
    }

    async fn approved_bid(store: &BidStore, escrow_index: u64) -> BidId {
        let id = store.add_bid(draft()).await.unwrap();
        store.approve_bid(&id, escrow_index).await.unwrap();
        id
    }

    #[tokio::test]
    async fn test_successful_settlement_completes_bid() {
        let store = Arc::new(BidStore::open(Arc::new(MemoryStore::new())).await.unwrap());
        let id = approved_bid(&store, 3).await;

        let gateway = Arc::new(MockGateway::new(false));
        let engine = SettlementEngine::new(store.clone(), gateway);

        let receipt = engine.settle(&id).await.unwrap();
        assert_eq!(receipt.tx_hash, "0xabc3");

        let bid = store.get(&id).await.unwrap();
        assert_eq!(bid.status, BidStatus::Completed);
        assert!(bid.paid);
    }

    #[tokio::test]
    async fn test_failed_withdrawal_leaves_bid_untouched() {
        let store = Arc::new(BidStore::open(Arc::new(MemoryStore::new())).await.unwrap());
        let id = approved_bid(&store, 7).await;

        let gateway = Arc::new(MockGateway::new(true));
        let engine = SettlementEngine::new(store.clone(), gateway);

        let err = engine.settle(&id).await.unwrap_err();
        assert!(matches!(err, BidError::WithdrawalFailed(_)));

        let bid = store.get(&id).await.unwrap();
        assert_eq!(bid.status, BidStatus::Approved);
        assert!(!bid.paid);
        assert_eq!(bid.escrow_index, Some(7));
    }

    #[tokio::test]
    async fn test_settlement_requires_approved_status() {
        let store = Arc::new(BidStore::open(Arc::new(MemoryStore::new())).await.unwrap());
        let id = store.add_bid(draft()).await.unwrap();

        let gateway = Arc::new(MockGateway::new(false));
        let engine = SettlementEngine::new(store.clone(), gateway.clone());

        // Pending bid: refused before the gateway is ever called
        assert!(matches!(
            engine.settle(&id).await.unwrap_err(),
            BidError::InvalidTransition { .. }
        ));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_settlement_is_not_repeatable() {
        let store = Arc::new(BidStore::open(Arc::new(MemoryStore::new())).await.unwrap());
        let id = approved_bid(&store, 2).await;

        let gateway = Arc::new(MockGateway::new(false));
        let engine = SettlementEngine::new(store.clone(), gateway.clone());

        engine.settle(&id).await.unwrap();

        // The bid is now terminal; a second settlement is refused without
        // touching the chain again.
        assert!(matches!(
            engine.settle(&id).await.unwrap_err(),
            BidError::InvalidTransition { .. }
        ));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }
}
