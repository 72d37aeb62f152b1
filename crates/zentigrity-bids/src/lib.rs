/*!
# Zentigrity Bid Lifecycle Store

Records worker bids against civic-resolution tasks and moves them through
the approval workflow:

```text
Pending ──► Approved ──► Completed
   │
   └──► Rejected
```

No transition reverses, terminal states are final, and the full bid
history is retained indefinitely. Status is a closed variant and every
transition function is total over it: a request incompatible with the
bid's current status returns an `InvalidTransition` error instead of
silently applying.

Payment release is two-phase (see [`settlement`]): the external escrow
withdrawal must confirm before the store records completion.
*/

pub mod error;
pub mod metrics;
pub mod settlement;
pub mod store;
pub mod types;

pub use error::{BidError, Result};
pub use settlement::{EscrowGateway, SettlementEngine, TxReceipt};
pub use store::{BidStore, BID_STORAGE_KEY};
pub use types::{Bid, BidBookSnapshot, BidDraft, BidStatus};
