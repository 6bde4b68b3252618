use std::{process, sync::Arc};

use inlay::{
    application::{
        compose::CompositionService, content::ContentStore, error::AppError, page::PageService,
    },
    config,
    infra::{
        error::InfraError,
        http::{self, ApiState, HttpState, RouterState},
        site::SiteStore,
        telemetry,
    },
};
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
        .map_err(|err| InfraError::configuration(format!("failed to load configuration: {err}")))
        .map_err(AppError::from)?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let content = Arc::new(ContentStore::new());
    let site = Arc::new(SiteStore::new(settings.site.root.clone()));
    let composer = CompositionService::new(content.clone());
    let pages = Arc::new(PageService::new(site.clone(), composer));

    let http_state = HttpState { pages, site };
    let api_state = ApiState { content };

    serve_http(&settings, http_state, api_state).await
}

async fn serve_http(
    settings: &config::Settings,
    http_state: HttpState,
    api_state: ApiState,
) -> Result<(), AppError> {
    let router_state = RouterState {
        http: http_state,
        api: api_state,
    };
    let public_router = http::build_router(router_state.clone());
    let api_router = http::build_api_router(router_state.clone());
    let app = public_router.merge(api_router).with_state(router_state);

    let listener = tokio::net::TcpListener::bind(settings.server.public_addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "inlay::serve",
        addr = %settings.server.public_addr,
        site_root = %settings.site.root.display(),
        "listening"
    );

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}
