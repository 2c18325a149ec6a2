//! Settings form: field table, form parsing, handlers.
//!
//! The form is driven by one enumerated field table; rendering iterates it,
//! so adding a setting means adding a row, not a renderer.

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use thiserror::Error;

use crate::application::error::HttpError;
use crate::application::settings::{SettingsError, UpdateOptionsCommand};
use crate::domain::entities::OptionsRecord;
use crate::policy::DURATION_CHOICES;
use crate::presentation::admin::{
    AdminSettingsTemplate, DurationChoiceView, DurationFieldView, NoticeView, SettingsFormView,
    ToggleFieldView,
};
use crate::presentation::views::{LayoutChrome, render_template_response};

use super::AdminState;

const SOURCE: &str = "infra::http::admin::settings";

/// What kind of control a settings field renders as.
pub(super) enum FieldKind {
    Duration,
    Toggle,
}

pub(super) struct SettingsField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

/// The whole settings surface, in display order.
pub(super) const SETTINGS_FIELDS: &[SettingsField] = &[
    SettingsField {
        key: "cache_control_homepage",
        label: "Home page",
        kind: FieldKind::Duration,
    },
    SettingsField {
        key: "cache_control_single",
        label: "Pages and single posts",
        kind: FieldKind::Duration,
    },
    SettingsField {
        key: "cache_control_archive",
        label: "Archives",
        kind: FieldKind::Duration,
    },
    SettingsField {
        key: "cache_control_default",
        label: "Default",
        kind: FieldKind::Duration,
    },
    SettingsField {
        key: "enable_etag",
        label: "Enable Etag header",
        kind: FieldKind::Toggle,
    },
    SettingsField {
        key: "enable_last_modified",
        label: "Enable Last-Modified header",
        kind: FieldKind::Toggle,
    },
    SettingsField {
        key: "enable_emojis",
        label: "Enable emojis",
        kind: FieldKind::Toggle,
    },
];

#[derive(Debug, Clone, Deserialize)]
pub(super) struct AdminSettingsForm {
    cache_control_homepage: String,
    cache_control_single: String,
    cache_control_archive: String,
    cache_control_default: String,
    enable_etag: Option<String>,
    enable_last_modified: Option<String>,
    enable_emojis: Option<String>,
}

#[derive(Debug, Error)]
enum AdminSettingsFormError {
    #[error("`{field}` must be a number of seconds")]
    InvalidDuration { field: &'static str },
}

impl AdminSettingsForm {
    fn to_command(&self) -> Result<UpdateOptionsCommand, AdminSettingsFormError> {
        Ok(UpdateOptionsCommand {
            cache_control_homepage: parse_duration(
                &self.cache_control_homepage,
                "cache_control_homepage",
            )?,
            cache_control_single: parse_duration(
                &self.cache_control_single,
                "cache_control_single",
            )?,
            cache_control_archive: parse_duration(
                &self.cache_control_archive,
                "cache_control_archive",
            )?,
            cache_control_default: parse_duration(
                &self.cache_control_default,
                "cache_control_default",
            )?,
            enable_etag: self.enable_etag.is_some(),
            enable_last_modified: self.enable_last_modified.is_some(),
            enable_emojis: self.enable_emojis.is_some(),
        })
    }
}

fn parse_duration(value: &str, field: &'static str) -> Result<u32, AdminSettingsFormError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| AdminSettingsFormError::InvalidDuration { field })
}

/// Build the form view by iterating the field table against a record.
pub(super) fn build_form_view(record: &OptionsRecord, notice: Option<NoticeView>) -> SettingsFormView {
    let mut durations = Vec::new();
    let mut toggles = Vec::new();

    for field in SETTINGS_FIELDS {
        match field.kind {
            FieldKind::Duration => {
                let current = duration_value(record, field.key);
                durations.push(DurationFieldView {
                    key: field.key,
                    label: field.label,
                    choices: DURATION_CHOICES
                        .iter()
                        .map(|&(value, label)| DurationChoiceView {
                            value,
                            label,
                            selected: value == current,
                        })
                        .collect(),
                });
            }
            FieldKind::Toggle => {
                toggles.push(ToggleFieldView {
                    key: field.key,
                    label: field.label,
                    checked: toggle_value(record, field.key),
                });
            }
        }
    }

    SettingsFormView {
        durations,
        toggles,
        notice,
        form_action: "/settings".to_string(),
    }
}

fn duration_value(record: &OptionsRecord, key: &str) -> u32 {
    match key {
        "cache_control_homepage" => record.cache_control_homepage,
        "cache_control_single" => record.cache_control_single,
        "cache_control_archive" => record.cache_control_archive,
        "cache_control_default" => record.cache_control_default,
        _ => OptionsRecord::DEFAULT_TTL_SECONDS,
    }
}

fn toggle_value(record: &OptionsRecord, key: &str) -> bool {
    match key {
        "enable_etag" => record.enable_etag,
        "enable_last_modified" => record.enable_last_modified,
        "enable_emojis" => record.enable_emojis,
        _ => false,
    }
}

pub(super) async fn admin_settings(State(state): State<AdminState>) -> Response {
    let chrome = state.admin_chrome().await;
    let record = match state.settings.load().await {
        Ok(record) => record,
        Err(error) => return settings_error(error).into_response(),
    };

    let template = AdminSettingsTemplate {
        chrome,
        view: build_form_view(&record, None),
    };
    render_template_response(template, StatusCode::OK)
}

pub(super) async fn admin_settings_update(
    State(state): State<AdminState>,
    Form(form): Form<AdminSettingsForm>,
) -> Response {
    let chrome = state.admin_chrome().await;

    let command = match form.to_command() {
        Ok(command) => command,
        Err(error) => {
            return rerender_with_notice(&state, chrome, NoticeView::error(error.to_string()))
                .await;
        }
    };

    match state.settings.update(command).await {
        Ok(record) => {
            let template = AdminSettingsTemplate {
                chrome,
                view: build_form_view(
                    &record,
                    Some(NoticeView::success("Caching settings updated")),
                ),
            };
            render_template_response(template, StatusCode::OK)
        }
        Err(SettingsError::IllegalDuration(field)) => {
            rerender_with_notice(
                &state,
                chrome,
                NoticeView::error(format!(
                    "`{field}` must be one of the offered cache durations"
                )),
            )
            .await
        }
        Err(error) => settings_error(error).into_response(),
    }
}

/// Re-render the stored values with a notice after a rejected submission.
async fn rerender_with_notice(
    state: &AdminState,
    chrome: LayoutChrome,
    notice: NoticeView,
) -> Response {
    let record = match state.settings.load().await {
        Ok(record) => record,
        Err(error) => return settings_error(error).into_response(),
    };

    let template = AdminSettingsTemplate {
        chrome,
        view: build_form_view(&record, Some(notice)),
    };
    render_template_response(template, StatusCode::UNPROCESSABLE_ENTITY)
}

fn settings_error(error: SettingsError) -> HttpError {
    HttpError::from_error(
        SOURCE,
        StatusCode::SERVICE_UNAVAILABLE,
        "Settings are temporarily unavailable",
        &error,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(durations: [&str; 4]) -> AdminSettingsForm {
        AdminSettingsForm {
            cache_control_homepage: durations[0].to_string(),
            cache_control_single: durations[1].to_string(),
            cache_control_archive: durations[2].to_string(),
            cache_control_default: durations[3].to_string(),
            enable_etag: Some("1".to_string()),
            enable_last_modified: None,
            enable_emojis: Some("1".to_string()),
        }
    }

    #[test]
    fn checkbox_presence_maps_to_bool() {
        let command = form(["300", "600", "1800", "0"]).to_command().expect("command");
        assert!(command.enable_etag);
        assert!(!command.enable_last_modified);
        assert!(command.enable_emojis);
        assert_eq!(command.cache_control_default, 0);
    }

    #[test]
    fn non_numeric_duration_is_rejected() {
        let error = form(["300", "soon", "1800", "0"])
            .to_command()
            .expect_err("must reject");
        assert!(error.to_string().contains("cache_control_single"));
    }

    #[test]
    fn form_view_iterates_the_field_table() {
        let view = build_form_view(&OptionsRecord::default(), None);
        assert_eq!(view.durations.len(), 4);
        assert_eq!(view.toggles.len(), 3);
        // Defaults: 300 selected everywhere, only emojis checked.
        for field in &view.durations {
            let selected: Vec<_> = field.choices.iter().filter(|c| c.selected).collect();
            assert_eq!(selected.len(), 1);
            assert_eq!(selected[0].value, 300);
        }
        assert!(view.toggles.iter().any(|t| t.key == "enable_emojis" && t.checked));
        assert!(view.toggles.iter().any(|t| t.key == "enable_etag" && !t.checked));
    }
}
