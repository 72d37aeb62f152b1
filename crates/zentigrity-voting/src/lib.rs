/*!
# Zentigrity Voting Ledger

Quadratic-voting credit allocation for DAO members:

- Fixed spendable budget per member (16 credits by default); casting `n`
  votes on a proposal costs `n²` credits
- One-time submission lock: once finalized, the allocation is immutable,
  and the lock survives restart through persistence
- Over-budget requests are rejected-but-valid: the ledger stays unchanged
  and reports the shortfall, it does not error

## Module Structure

- **types**: config, proposals, snapshots, vote outcomes
- **ledger**: the synchronous credit ledger state machine
- **store**: persistent, lock-guarded wrapper around the ledger
- **error**: voting-specific errors
- **metrics**: Prometheus counters and gauges

## Example Usage

```rust
use zentigrity_voting::{VotingLedger, VoteOutcome};
use zentigrity_types::ProposalId;

let mut ledger = VotingLedger::new(16);
let proposal = ProposalId::new("BID-1700000000123");

// 3 votes cost 9 credits
let outcome = ledger.cast_vote(&proposal, 3);
assert!(outcome.is_applied());
assert_eq!(ledger.credits(), 7);

// Locking is permanent
ledger.finalize().unwrap();
assert_eq!(ledger.cast_vote(&proposal, 4), VoteOutcome::Finalized);
```
*/

pub mod error;
pub mod ledger;
pub mod metrics;
pub mod store;
pub mod types;

pub use error::{Result, VotingError};
pub use ledger::VotingLedger;
pub use store::{VotingStore, VOTING_STORAGE_KEY};
pub use types::{
    LedgerSnapshot, Proposal, ProposalTally, VoteOutcome, VotingConfig, DEFAULT_CREDIT_BUDGET,
    DEFAULT_VOTING_PERIOD_DAYS,
};
