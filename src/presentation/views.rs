use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::application::chrome::HeadSnippet;
use crate::application::error::HttpError;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

const DISPLAY_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[day] [month repr:short] [year]");

/// Human-readable date for listings: `15 Jan 2024`.
pub fn display_date(instant: OffsetDateTime) -> String {
    instant
        .format(&DISPLAY_DATE)
        .unwrap_or_else(|_| instant.date().to_string())
}

/// Shared layout data: site title plus the head injection points.
#[derive(Debug, Clone)]
pub struct LayoutChrome {
    pub site_title: String,
    pub head_snippets: Vec<HeadSnippet>,
}

#[derive(Debug, Clone)]
pub struct PostCardView {
    pub title: String,
    pub href: String,
    pub published: String,
}

#[derive(Debug, Clone)]
pub struct PostView {
    pub title: String,
    pub body_html: String,
    pub published: String,
}

#[derive(Debug, Clone)]
pub struct PageView {
    pub title: String,
    pub body_html: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub chrome: LayoutChrome,
    pub posts: Vec<PostCardView>,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub chrome: LayoutChrome,
    pub post: PostView,
}

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub chrome: LayoutChrome,
    pub page: PageView,
}

#[derive(Template)]
#[template(path = "archive.html")]
pub struct ArchiveTemplate {
    pub chrome: LayoutChrome,
    pub heading: String,
    pub posts: Vec<PostCardView>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub chrome: LayoutChrome,
    pub status: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn display_date_is_short_and_unpadded_year() {
        assert_eq!(display_date(datetime!(2024-01-15 10:00:00 UTC)), "15 Jan 2024");
    }
}
