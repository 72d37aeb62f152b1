/*!
# Zentigrity Shared Types

Primitives shared by the voting ledger and the bid lifecycle store:

- **ids**: string identifiers for proposals, tasks and bids
- **amount**: fixed-point currency amounts in base units
- **address**: hex-encoded chain wallet addresses
- **lifecycle**: the state-machine trait implemented by lifecycle enums
*/

pub mod address;
pub mod amount;
pub mod ids;
pub mod lifecycle;

pub use address::WalletAddress;
pub use amount::Amount;
pub use ids::{BidId, ProposalId, TaskId};
pub use lifecycle::LifecycleState;
