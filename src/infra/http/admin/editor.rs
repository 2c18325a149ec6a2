//! Bootstrap configuration for the embedded content editor.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::application::chrome::strip_emoji_editor_plugin;
use crate::application::error::HttpError;

use super::AdminState;

/// Plugins the embedded editor loads by default.
const EDITOR_PLUGINS: &[&str] = &["lists", "links", "wpemoji", "autosave"];

pub(super) async fn editor_config(State(state): State<AdminState>) -> Response {
    let record = match state.settings.load().await {
        Ok(record) => record,
        Err(error) => {
            return HttpError::from_error(
                "infra::http::admin::editor",
                StatusCode::SERVICE_UNAVAILABLE,
                "Editor configuration unavailable",
                &error,
            )
            .into_response();
        }
    };

    let plugins: Vec<String> = if record.enable_emojis {
        EDITOR_PLUGINS.iter().map(|p| p.to_string()).collect()
    } else {
        strip_emoji_editor_plugin(&json!(EDITOR_PLUGINS))
    };

    Json(json!({
        "plugins": plugins,
        "menubar": false,
        "statusbar": false,
    }))
    .into_response()
}
