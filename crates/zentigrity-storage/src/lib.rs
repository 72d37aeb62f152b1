/*!
# Zentigrity Storage

Persistence boundary for the voting ledger and the bid store. Each store
persists its whole state as a JSON blob under a fixed storage key; reading
back an absent or malformed blob yields the initial state.

Two backends are provided:

- [`MemoryStore`] for tests and ephemeral sessions
- [`FileStore`] for durable, file-per-key snapshots

Both implement [`SnapshotStore`]; the domain crates take an
`Arc<dyn SnapshotStore>` so the backend is injected, never ambient.
*/

pub mod codec;
pub mod file;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Blob-per-key snapshot persistence.
///
/// Last writer wins; no versioning or conflict detection. The stores are
/// single-writer by design.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read the blob stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the blob stored under `key`.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Remove the blob stored under `key`. Removing an absent key is not an
    /// error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Ensure previously written blobs are durable.
    async fn flush(&self) -> Result<()>;
}
