//! Options persistence: a single TOML document on disk.
//!
//! The on-disk document is the source of truth across restarts; a copy is
//! held in memory so the per-request policy snapshot never touches the
//! filesystem. Writes go to a temp file first and are renamed into place.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::application::repos::{OptionsStore, OptionsStoreError};
use crate::domain::entities::OptionsRecord;

#[derive(Debug)]
pub struct FileOptionsStore {
    path: PathBuf,
    current: RwLock<OptionsRecord>,
}

impl FileOptionsStore {
    /// Open the store, reading the document if it exists. A missing file is
    /// not an error: the store starts from defaults and the file appears on
    /// the first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, OptionsStoreError> {
        let path = path.into();
        let record = match tokio::fs::read_to_string(&path).await {
            Ok(document) => toml::from_str(&document)?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    target = "lacquer::options",
                    path = %path.display(),
                    "no options file yet, starting from defaults"
                );
                OptionsRecord::default()
            }
            Err(error) => return Err(error.into()),
        };

        Ok(Self {
            path,
            current: RwLock::new(record),
        })
    }

    async fn persist(&self, record: &OptionsRecord) -> Result<(), OptionsStoreError> {
        let document = toml::to_string_pretty(record)?;
        let staging = staging_path(&self.path);
        tokio::fs::write(&staging, document).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        debug!(
            target = "lacquer::options",
            path = %self.path.display(),
            "options document written"
        );
        Ok(())
    }
}

#[async_trait]
impl OptionsStore for FileOptionsStore {
    async fn load(&self) -> Result<OptionsRecord, OptionsStoreError> {
        Ok(self.current.read().await.clone())
    }

    async fn store(&self, record: OptionsRecord) -> Result<(), OptionsStoreError> {
        // Hold the write lock across the disk write so concurrent updates
        // cannot interleave memory and file state.
        let mut current = self.current.write().await;
        self.persist(&record).await?;
        *current = record;
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Volatile store for tests and the `check` command.
#[derive(Default)]
pub struct MemoryOptionsStore {
    current: RwLock<OptionsRecord>,
}

impl MemoryOptionsStore {
    pub fn new(record: OptionsRecord) -> Self {
        Self {
            current: RwLock::new(record),
        }
    }
}

#[async_trait]
impl OptionsStore for MemoryOptionsStore {
    async fn load(&self) -> Result<OptionsRecord, OptionsStoreError> {
        Ok(self.current.read().await.clone())
    }

    async fn store(&self, record: OptionsRecord) -> Result<(), OptionsStoreError> {
        *self.current.write().await = record;
        Ok(())
    }
}
