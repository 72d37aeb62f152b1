use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use zentigrity_voting::VotingConfig;

/// Snapshot persistence backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Ephemeral, for tests and dry runs
    Memory,
    /// Durable file-per-key snapshots under `data_dir`
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Complete application configuration, loadable from a TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZentigrityConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub voting: VotingConfig,
}

impl ZentigrityConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!(
            path = %path.display(),
            backend = ?config.storage.backend,
            credit_budget = config.voting.credit_budget,
            "Configuration loaded"
        );

        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}
