//! Page chrome: head snippets shared by every layout, and the embedded
//! editor's plugin list.
//!
//! The emoji detection script and its styles are injection points gated by
//! the `enable_emojis` option, on both the public and the admin surface.

use serde_json::Value;

/// Identifier of the emoji plugin inside the embedded editor's plugin list.
pub const EMOJI_EDITOR_PLUGIN: &str = "wpemoji";

const EMOJI_DETECTION_SCRIPT: &str =
    r#"<script src="/static/emoji/detect.js" defer></script>"#;
const EMOJI_STYLES: &str =
    r#"<style>img.emoji{height:1em;width:1em;margin:0 .07em;vertical-align:-0.1em}</style>"#;
const BASE_STYLESHEET: &str = r#"<link rel="stylesheet" href="/static/site.css">"#;
const ADMIN_STYLESHEET: &str = r#"<link rel="stylesheet" href="/static/admin.css">"#;

/// One named `<head>` injection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadSnippet {
    pub id: &'static str,
    pub html: &'static str,
}

/// Assembles the head snippets for both layouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeService;

impl ChromeService {
    pub fn new() -> Self {
        Self
    }

    /// Head snippets for public pages.
    pub fn public_head(&self, emoji_scripts_enabled: bool) -> Vec<HeadSnippet> {
        let mut snippets = vec![HeadSnippet {
            id: "site-styles",
            html: BASE_STYLESHEET,
        }];
        if emoji_scripts_enabled {
            snippets.push(HeadSnippet {
                id: "emoji-detection",
                html: EMOJI_DETECTION_SCRIPT,
            });
            snippets.push(HeadSnippet {
                id: "emoji-styles",
                html: EMOJI_STYLES,
            });
        }
        snippets
    }

    /// Head snippets for the admin surface. The emoji injection points are
    /// gated here too, not just on the public side.
    pub fn admin_head(&self, emoji_scripts_enabled: bool) -> Vec<HeadSnippet> {
        let mut snippets = vec![HeadSnippet {
            id: "admin-styles",
            html: ADMIN_STYLESHEET,
        }];
        if emoji_scripts_enabled {
            snippets.push(HeadSnippet {
                id: "emoji-detection",
                html: EMOJI_DETECTION_SCRIPT,
            });
            snippets.push(HeadSnippet {
                id: "emoji-styles",
                html: EMOJI_STYLES,
            });
        }
        snippets
    }
}

/// Strip the emoji plugin from an editor plugin list.
///
/// The configured value is arbitrary JSON; anything that is not actually a
/// list collapses to an empty one rather than passing through unchecked.
pub fn strip_emoji_editor_plugin(raw: &Value) -> Vec<String> {
    let Some(items) = raw.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| item.as_str())
        .filter(|plugin| *plugin != EMOJI_EDITOR_PLUGIN)
        .map(str::to_owned)
        .collect()
}
