use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::Response,
    routing::get,
};
use tracing::warn;

use crate::{
    application::{
        chrome::ChromeService,
        content::ContentService,
        repos::OptionsStore,
    },
    domain::classification::{Classified, PageClass},
    domain::entities::PostRecord,
    policy::{PolicyState, caching_headers_layer},
    presentation::views::{
        ArchiveTemplate, ErrorTemplate, IndexTemplate, LayoutChrome, PageTemplate, PageView,
        PostCardView, PostTemplate, PostView, display_date, render_template_response,
    },
};

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub content: Arc<ContentService>,
    pub chrome: ChromeService,
    pub options: Arc<dyn OptionsStore>,
    pub site_title: Arc<str>,
    pub policy: PolicyState,
}

impl HttpState {
    /// Chrome for public pages; an unreadable options store falls back to
    /// default injection points rather than failing the page.
    async fn public_chrome(&self) -> LayoutChrome {
        let emojis_enabled = match self.options.load().await {
            Ok(record) => record.enable_emojis,
            Err(error) => {
                warn!(
                    target = "lacquer::http",
                    error = %error,
                    "options store unavailable, assuming default chrome"
                );
                true
            }
        };
        LayoutChrome {
            site_title: self.site_title.to_string(),
            head_snippets: self.chrome.public_head(emojis_enabled),
        }
    }
}

pub fn build_public_router(state: HttpState) -> Router {
    let policy_state = state.policy.clone();
    Router::new()
        .route("/", get(index))
        .route("/posts/{slug}", get(post_detail))
        .route("/pages/{slug}", get(page_detail))
        .route("/tags/{tag}", get(tag_index))
        .route("/archive/{month}", get(month_index))
        .route("/_health", get(health))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn_with_state(
            policy_state,
            caching_headers_layer,
        ))
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn index(State(state): State<HttpState>) -> Response {
    let chrome = state.public_chrome().await;
    let posts = state
        .content
        .recent_posts()
        .iter()
        .map(post_card)
        .collect();

    let response = render_template_response(IndexTemplate { chrome, posts }, StatusCode::OK);
    classified(response, Classified::new(PageClass::Home))
}

async fn post_detail(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    let chrome = state.public_chrome().await;
    let Some(post) = state.content.post_by_slug(&slug) else {
        return not_found_page(chrome);
    };

    let view = PostView {
        title: post.title.clone(),
        body_html: post.body_html.clone(),
        published: display_date(post.published_at),
    };
    let marker = Classified::single(post.modified_at);
    let response = render_template_response(PostTemplate { chrome, post: view }, StatusCode::OK);
    classified(response, marker)
}

async fn page_detail(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    let chrome = state.public_chrome().await;
    let Some(page) = state.content.page_by_slug(&slug) else {
        return not_found_page(chrome);
    };

    let view = PageView {
        title: page.title.clone(),
        body_html: page.body_html.clone(),
    };
    let marker = Classified::single(page.modified_at);
    let response = render_template_response(PageTemplate { chrome, page: view }, StatusCode::OK);
    classified(response, marker)
}

async fn tag_index(State(state): State<HttpState>, Path(tag): Path<String>) -> Response {
    let chrome = state.public_chrome().await;
    let posts = state
        .content
        .posts_with_tag(&tag)
        .into_iter()
        .map(post_card)
        .collect();

    let template = ArchiveTemplate {
        chrome,
        heading: format!("Posts tagged `{tag}`"),
        posts,
    };
    let response = render_template_response(template, StatusCode::OK);
    classified(response, Classified::new(PageClass::Archive))
}

async fn month_index(State(state): State<HttpState>, Path(month): Path<String>) -> Response {
    let chrome = state.public_chrome().await;
    let posts = state
        .content
        .posts_in_month(&month)
        .into_iter()
        .map(post_card)
        .collect();

    let template = ArchiveTemplate {
        chrome,
        heading: format!("Archive for {month}"),
        posts,
    };
    let response = render_template_response(template, StatusCode::OK);
    classified(response, Classified::new(PageClass::Archive))
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn not_found(State(state): State<HttpState>) -> Response {
    let chrome = state.public_chrome().await;
    not_found_page(chrome)
}

fn not_found_page(chrome: LayoutChrome) -> Response {
    let template = ErrorTemplate {
        chrome,
        status: StatusCode::NOT_FOUND.as_u16(),
        message: "That page does not exist.".to_string(),
    };
    let response = render_template_response(template, StatusCode::NOT_FOUND);
    classified(response, Classified::new(PageClass::Other))
}

fn post_card(post: &PostRecord) -> PostCardView {
    PostCardView {
        title: post.title.clone(),
        href: format!("/posts/{}", post.slug),
        published: display_date(post.published_at),
    }
}

fn classified(mut response: Response, marker: Classified) -> Response {
    response.extensions_mut().insert(marker);
    response
}
