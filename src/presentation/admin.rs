//! View models for the admin settings surface.

use askama::Template;

use super::views::LayoutChrome;

#[derive(Debug, Clone)]
pub struct NoticeView {
    pub kind: &'static str,
    pub message: String,
}

impl NoticeView {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: "success",
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error",
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DurationChoiceView {
    pub value: u32,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct DurationFieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub choices: Vec<DurationChoiceView>,
}

#[derive(Debug, Clone)]
pub struct ToggleFieldView {
    pub key: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone)]
pub struct SettingsFormView {
    pub durations: Vec<DurationFieldView>,
    pub toggles: Vec<ToggleFieldView>,
    pub notice: Option<NoticeView>,
    pub form_action: String,
}

#[derive(Template)]
#[template(path = "admin/settings.html")]
pub struct AdminSettingsTemplate {
    pub chrome: LayoutChrome,
    pub view: SettingsFormView,
}
