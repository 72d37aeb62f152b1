use crate::SnapshotStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed snapshot store: one JSON blob file per storage key.
///
/// The durable analog of the original client's local storage. Writes go
/// through a temp file and rename so a crash mid-write leaves the previous
/// snapshot intact.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;

        info!(
            data_dir = %data_dir.display(),
            storage_type = "file",
            "Snapshot store opened"
        );

        Ok(Self { data_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl SnapshotStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read snapshot {}", path.display())),
        }
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        let path = self.path_for(key);
        let tmp_path = self.data_dir.join(format!("{}.json.tmp", key));

        tokio::fs::write(&tmp_path, &bytes)
            .await
            .with_context(|| format!("Failed to write snapshot {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .with_context(|| format!("Failed to commit snapshot {}", path.display()))?;

        debug!(
            key = key,
            blob_len = bytes.len(),
            path = %path.display(),
            storage_type = "file",
            "Snapshot stored"
        );
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove snapshot {}", path.display()))
            }
        }
    }

    async fn flush(&self) -> Result<()> {
        // Writes are committed at put time via rename
        Ok(())
    }
}
