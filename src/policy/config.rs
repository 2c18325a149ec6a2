//! Per-request policy configuration snapshot.

use crate::domain::classification::PageClass;
use crate::domain::entities::OptionsRecord;

/// TTL values offered by the settings surface, with their display labels.
/// Submitted durations must be one of these.
pub const DURATION_CHOICES: [(u32, &str); 8] = [
    (0, "Never"),
    (300, "5 minutes"),
    (600, "10 minutes"),
    (1800, "30 minutes"),
    (3600, "1 hour"),
    (4 * 3600, "4 hours"),
    (12 * 3600, "12 hours"),
    (24 * 3600, "24 hours"),
];

/// Whether a duration is one of the values the settings surface offers.
pub fn is_legal_duration(seconds: u32) -> bool {
    DURATION_CHOICES
        .iter()
        .any(|(value, _)| *value == seconds)
}

/// Immutable snapshot of the caching options for one request.
///
/// Built from the options store once per incoming request and read-only for
/// the rest of that request's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    pub homepage_ttl: u32,
    pub single_ttl: u32,
    pub archive_ttl: u32,
    pub default_ttl: u32,
    pub etag_enabled: bool,
    pub last_modified_enabled: bool,
    pub emoji_scripts_enabled: bool,
}

impl PolicyConfig {
    /// TTL in seconds for a page class. `0` means "never cache" and is still
    /// emitted as `s-maxage=0`.
    pub fn ttl_for(&self, class: PageClass) -> u32 {
        match class {
            PageClass::Home => self.homepage_ttl,
            PageClass::Single => self.single_ttl,
            PageClass::Archive => self.archive_ttl,
            PageClass::Other => self.default_ttl,
        }
    }
}

impl From<&OptionsRecord> for PolicyConfig {
    fn from(record: &OptionsRecord) -> Self {
        Self {
            homepage_ttl: record.cache_control_homepage,
            single_ttl: record.cache_control_single,
            archive_ttl: record.cache_control_archive,
            default_ttl: record.cache_control_default,
            etag_enabled: record.enable_etag,
            last_modified_enabled: record.enable_last_modified,
            emoji_scripts_enabled: record.enable_emojis,
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::from(&OptionsRecord::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_follows_classification() {
        let config = PolicyConfig {
            homepage_ttl: 60,
            single_ttl: 120,
            archive_ttl: 180,
            default_ttl: 240,
            etag_enabled: false,
            last_modified_enabled: false,
            emoji_scripts_enabled: true,
        };
        assert_eq!(config.ttl_for(PageClass::Home), 60);
        assert_eq!(config.ttl_for(PageClass::Single), 120);
        assert_eq!(config.ttl_for(PageClass::Archive), 180);
        assert_eq!(config.ttl_for(PageClass::Other), 240);
    }

    #[test]
    fn legal_durations_are_the_offered_choices() {
        for (value, _) in DURATION_CHOICES {
            assert!(is_legal_duration(value));
        }
        assert!(!is_legal_duration(1));
        assert!(!is_legal_duration(7200));
    }

    #[test]
    fn snapshot_mirrors_options_record() {
        let record = OptionsRecord {
            cache_control_homepage: 3600,
            enable_etag: true,
            ..Default::default()
        };
        let config = PolicyConfig::from(&record);
        assert_eq!(config.homepage_ttl, 3600);
        assert!(config.etag_enabled);
        assert!(!config.last_modified_enabled);
        assert!(config.emoji_scripts_enabled);
    }
}
