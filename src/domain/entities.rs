//! Domain entities mirrored from persistent storage.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

fn default_ttl() -> u32 {
    OptionsRecord::DEFAULT_TTL_SECONDS
}

fn default_emojis_enabled() -> bool {
    true
}

/// Runtime options edited through the admin settings surface and persisted
/// in the options store. Field names double as storage keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsRecord {
    /// Shared-cache TTL for the front page, seconds. `0` means never cache.
    pub cache_control_homepage: u32,
    /// Shared-cache TTL for single posts and static pages, seconds.
    pub cache_control_single: u32,
    /// Shared-cache TTL for tag and month archives, seconds.
    pub cache_control_archive: u32,
    /// Shared-cache TTL for every other page, seconds.
    pub cache_control_default: u32,
    /// Emit an `Etag` header computed over the rendered body.
    pub enable_etag: bool,
    /// Emit a `Last-Modified` header.
    pub enable_last_modified: bool,
    /// Inject the emoji detection script and styles into page heads.
    pub enable_emojis: bool,
}

impl OptionsRecord {
    pub const DEFAULT_TTL_SECONDS: u32 = 300;
}

impl Default for OptionsRecord {
    fn default() -> Self {
        Self {
            cache_control_homepage: default_ttl(),
            cache_control_single: default_ttl(),
            cache_control_archive: default_ttl(),
            cache_control_default: default_ttl(),
            enable_etag: false,
            enable_last_modified: false,
            enable_emojis: default_emojis_enabled(),
        }
    }
}

/// A published post loaded from the content directory.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub slug: String,
    pub title: String,
    pub body_html: String,
    pub published_at: OffsetDateTime,
    /// Missing or unparseable modification times load as `None`; the
    /// Last-Modified decision then falls back to the current time.
    pub modified_at: Option<OffsetDateTime>,
    pub tags: Vec<String>,
}

/// A static page loaded from the content directory.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    pub slug: String,
    pub title: String,
    pub body_html: String,
    pub modified_at: Option<OffsetDateTime>,
}
