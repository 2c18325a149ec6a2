use std::{process, sync::Arc};

use lacquer::{
    application::{
        chrome::ChromeService, content::ContentService, error::AppError, repos::OptionsStore,
        settings::SettingsService,
    },
    config,
    infra::{
        content::load_content,
        error::InfraError,
        http::{self, AdminState, HttpState},
        options::FileOptionsStore,
        telemetry,
    },
    policy::PolicyState,
};
use tokio::try_join;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Check(_) => run_check(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let (http_state, admin_state) = build_application_state(&settings).await?;

    let public_router = http::build_public_router(http_state);
    let admin_router = http::build_admin_router(admin_state);

    let public_listener = tokio::net::TcpListener::bind(settings.server.public_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    let admin_listener = tokio::net::TcpListener::bind(settings.server.admin_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "lacquer::serve",
        public = %settings.server.public_addr,
        admin = %settings.server.admin_addr,
        "listening"
    );

    let public_server = axum::serve(public_listener, public_router.into_make_service());
    let admin_server = axum::serve(admin_listener, admin_router.into_make_service());

    try_join!(public_server, admin_server)
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

async fn run_check(settings: config::Settings) -> Result<(), AppError> {
    let store = FileOptionsStore::open(&settings.options.path)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    let record = store
        .load()
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    let (posts, pages) = load_content(&settings.content.directory).map_err(AppError::from)?;

    info!(
        target = "lacquer::check",
        options = %settings.options.path.display(),
        content = %settings.content.directory.display(),
        posts = posts.len(),
        pages = pages.len(),
        homepage_ttl = record.cache_control_homepage,
        single_ttl = record.cache_control_single,
        archive_ttl = record.cache_control_archive,
        default_ttl = record.cache_control_default,
        etag = record.enable_etag,
        last_modified = record.enable_last_modified,
        emojis = record.enable_emojis,
        "configuration, options and content are loadable"
    );

    Ok(())
}

async fn build_application_state(
    settings: &config::Settings,
) -> Result<(HttpState, AdminState), AppError> {
    let options: Arc<dyn OptionsStore> = Arc::new(
        FileOptionsStore::open(&settings.options.path)
            .await
            .map_err(|err| AppError::from(InfraError::from(err)))?,
    );

    let (posts, pages) = load_content(&settings.content.directory).map_err(AppError::from)?;
    let content = Arc::new(ContentService::new(posts, pages));

    let chrome = ChromeService::new();
    let settings_service = Arc::new(SettingsService::new(options.clone()));
    let site_title: Arc<str> = Arc::from(settings.site.title.as_str());

    let policy = PolicyState {
        options: options.clone(),
        session_token: settings
            .admin
            .session_token
            .as_deref()
            .map(Arc::from),
    };

    let http_state = HttpState {
        content,
        chrome,
        options: options.clone(),
        site_title: site_title.clone(),
        policy,
    };

    let admin_state = AdminState {
        settings: settings_service,
        chrome,
        options,
        site_title,
    };

    Ok((http_state, admin_state))
}
