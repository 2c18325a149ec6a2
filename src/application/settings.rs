//! Runtime-settings service backing the admin surface.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::application::repos::{OptionsStore, OptionsStoreError};
use crate::domain::entities::OptionsRecord;
use crate::policy::is_legal_duration;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("`{0}` is not one of the offered cache durations")]
    IllegalDuration(&'static str),
    #[error(transparent)]
    Store(#[from] OptionsStoreError),
}

/// Validated update coming out of the settings form.
#[derive(Debug, Clone)]
pub struct UpdateOptionsCommand {
    pub cache_control_homepage: u32,
    pub cache_control_single: u32,
    pub cache_control_archive: u32,
    pub cache_control_default: u32,
    pub enable_etag: bool,
    pub enable_last_modified: bool,
    pub enable_emojis: bool,
}

#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn OptionsStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn OptionsStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Result<OptionsRecord, SettingsError> {
        self.store.load().await.map_err(SettingsError::from)
    }

    pub async fn update(
        &self,
        command: UpdateOptionsCommand,
    ) -> Result<OptionsRecord, SettingsError> {
        ensure_legal_duration(command.cache_control_homepage, "cache_control_homepage")?;
        ensure_legal_duration(command.cache_control_single, "cache_control_single")?;
        ensure_legal_duration(command.cache_control_archive, "cache_control_archive")?;
        ensure_legal_duration(command.cache_control_default, "cache_control_default")?;

        let record = OptionsRecord {
            cache_control_homepage: command.cache_control_homepage,
            cache_control_single: command.cache_control_single,
            cache_control_archive: command.cache_control_archive,
            cache_control_default: command.cache_control_default,
            enable_etag: command.enable_etag,
            enable_last_modified: command.enable_last_modified,
            enable_emojis: command.enable_emojis,
        };

        self.store.store(record.clone()).await?;

        info!(
            target = "lacquer::settings",
            homepage = record.cache_control_homepage,
            single = record.cache_control_single,
            archive = record.cache_control_archive,
            default = record.cache_control_default,
            etag = record.enable_etag,
            last_modified = record.enable_last_modified,
            emojis = record.enable_emojis,
            "runtime options updated"
        );

        Ok(record)
    }
}

fn ensure_legal_duration(seconds: u32, field: &'static str) -> Result<(), SettingsError> {
    if !is_legal_duration(seconds) {
        return Err(SettingsError::IllegalDuration(field));
    }
    Ok(())
}
