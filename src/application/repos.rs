//! Storage traits implemented by the infrastructure layer.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::OptionsRecord;

#[derive(Debug, Error)]
pub enum OptionsStoreError {
    #[error("options store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("options document malformed: {0}")]
    Malformed(#[from] toml::de::Error),
    #[error("options document could not be encoded: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Key-value store holding the runtime options.
///
/// Reads happen once per public request (the policy snapshot) and once per
/// admin page view; writes only ever come from the settings surface.
#[async_trait]
pub trait OptionsStore: Send + Sync {
    async fn load(&self) -> Result<OptionsRecord, OptionsStoreError>;
    async fn store(&self, record: OptionsRecord) -> Result<(), OptionsStoreError>;
}
