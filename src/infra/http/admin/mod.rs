//! Admin surface: settings form and editor bootstrap config.
//!
//! Served from its own listener; anything that reaches this router is
//! considered an operator.

mod editor;
mod settings;

use std::sync::Arc;

use axum::{
    Router,
    middleware,
    response::Redirect,
    routing::get,
};
use tracing::warn;

use crate::application::{chrome::ChromeService, repos::OptionsStore, settings::SettingsService};
use crate::presentation::views::LayoutChrome;

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct AdminState {
    pub settings: Arc<SettingsService>,
    pub chrome: ChromeService,
    pub options: Arc<dyn OptionsStore>,
    pub site_title: Arc<str>,
}

impl AdminState {
    async fn admin_chrome(&self) -> LayoutChrome {
        let emojis_enabled = match self.options.load().await {
            Ok(record) => record.enable_emojis,
            Err(error) => {
                warn!(
                    target = "lacquer::http::admin",
                    error = %error,
                    "options store unavailable, assuming default chrome"
                );
                true
            }
        };
        LayoutChrome {
            site_title: self.site_title.to_string(),
            head_snippets: self.chrome.admin_head(emojis_enabled),
        }
    }
}

pub fn build_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/", get(admin_home))
        .route(
            "/settings",
            get(settings::admin_settings).post(settings::admin_settings_update),
        )
        .route("/editor/config", get(editor::editor_config))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn admin_home() -> Redirect {
    Redirect::to("/settings")
}
