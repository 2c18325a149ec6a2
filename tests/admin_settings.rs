//! Settings surface behavior through the admin router.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use tower::ServiceExt;

use lacquer::application::chrome::ChromeService;
use lacquer::application::repos::OptionsStore;
use lacquer::application::settings::SettingsService;
use lacquer::domain::entities::OptionsRecord;
use lacquer::infra::http::{AdminState, build_admin_router};
use lacquer::infra::options::MemoryOptionsStore;

fn admin(record: OptionsRecord) -> (Router, Arc<MemoryOptionsStore>) {
    let store = Arc::new(MemoryOptionsStore::new(record));
    let options: Arc<dyn OptionsStore> = store.clone();
    let state = AdminState {
        settings: Arc::new(SettingsService::new(options.clone())),
        chrome: ChromeService::new(),
        options,
        site_title: Arc::from("Test Site"),
    };
    (build_admin_router(state), store)
}

async fn get(router: Router, uri: &str) -> Response<Body> {
    router
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response")
}

async fn post_form(router: Router, uri: &str, form: &str) -> Response<Body> {
    router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from(form.to_string()))
                .expect("request"),
        )
        .await
        .expect("response")
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8")
}

#[tokio::test]
async fn settings_page_renders_the_field_table() {
    let (router, _) = admin(OptionsRecord::default());
    let response = get(router, "/settings").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    for key in [
        "cache_control_homepage",
        "cache_control_single",
        "cache_control_archive",
        "cache_control_default",
        "enable_etag",
        "enable_last_modified",
        "enable_emojis",
    ] {
        assert!(html.contains(key), "missing field `{key}`");
    }
    for label in ["Never", "5 minutes", "24 hours"] {
        assert!(html.contains(label), "missing duration label `{label}`");
    }
}

#[tokio::test]
async fn update_persists_through_the_store() {
    let (router, store) = admin(OptionsRecord::default());
    let response = post_form(
        router,
        "/settings",
        "cache_control_homepage=3600\
         &cache_control_single=14400\
         &cache_control_archive=1800\
         &cache_control_default=0\
         &enable_etag=1",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Caching settings updated"));

    let record = store.load().await.expect("load");
    assert_eq!(record.cache_control_homepage, 3600);
    assert_eq!(record.cache_control_single, 14400);
    assert_eq!(record.cache_control_default, 0);
    assert!(record.enable_etag);
    // Unchecked checkboxes come through as absent and persist as false.
    assert!(!record.enable_last_modified);
    assert!(!record.enable_emojis);
}

#[tokio::test]
async fn duration_outside_the_offered_set_is_rejected() {
    let (router, store) = admin(OptionsRecord::default());
    let response = post_form(
        router,
        "/settings",
        "cache_control_homepage=7200\
         &cache_control_single=300\
         &cache_control_archive=300\
         &cache_control_default=300\
         &enable_emojis=1",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("cache_control_homepage"));

    assert_eq!(store.load().await.expect("load"), OptionsRecord::default());
}

#[tokio::test]
async fn non_numeric_duration_is_rejected() {
    let (router, store) = admin(OptionsRecord::default());
    let response = post_form(
        router,
        "/settings",
        "cache_control_homepage=soon\
         &cache_control_single=300\
         &cache_control_archive=300\
         &cache_control_default=300",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(store.load().await.expect("load"), OptionsRecord::default());
}

#[tokio::test]
async fn admin_root_redirects_to_settings() {
    let (router, _) = admin(OptionsRecord::default());
    let response = get(router, "/").await;
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "/settings");
}

#[tokio::test]
async fn editor_config_strips_emoji_plugin_when_disabled() {
    let (router, _) = admin(OptionsRecord {
        enable_emojis: false,
        ..Default::default()
    });
    let response = get(router, "/editor/config").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(!body.contains("wpemoji"));
    assert!(body.contains("lists"));
}

#[tokio::test]
async fn editor_config_keeps_emoji_plugin_by_default() {
    let (router, _) = admin(OptionsRecord::default());
    let response = get(router, "/editor/config").await;
    let body = body_text(response).await;
    assert!(body.contains("wpemoji"));
}
