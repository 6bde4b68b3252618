use std::error::Error as StdError;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header::CONTENT_TYPE},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
};

use crate::{
    application::{error::ErrorReport, page::PageService},
    infra::site::{STATIC_PREFIXES, SiteStore, SiteStoreError},
};

use super::{
    RouterState,
    middleware::{log_responses, set_request_context},
};

#[derive(Clone)]
pub struct HttpState {
    pub pages: Arc<PageService>,
    pub site: Arc<SiteStore>,
}

pub fn build_router(state: RouterState) -> Router<RouterState> {
    let mut router = Router::new().route("/", get(index));

    for &prefix in STATIC_PREFIXES {
        router = router.route(
            &format!("/{prefix}/{{*path}}"),
            get(move |State(state): State<HttpState>, Path(path): Path<String>| async move {
                serve_asset(&state, prefix, &path).await
            }),
        );
    }

    router
        .route("/{page}", get(page_by_name))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn index(State(state): State<HttpState>) -> Response {
    page_response(&state, "index").await
}

async fn page_by_name(State(state): State<HttpState>, Path(page): Path<String>) -> Response {
    page_response(&state, &page).await
}

async fn page_response(state: &HttpState, name: &str) -> Response {
    match state.pages.render_page(name).await {
        Ok(Some(html)) => Html(html).into_response(),
        Ok(None) => not_found_response("infra::http::public::page", "Page not found"),
        Err(SiteStoreError::InvalidPath) => {
            not_found_response("infra::http::public::page", "Page not found")
        }
        Err(err) => internal_error_response("infra::http::public::page", &err),
    }
}

async fn serve_asset(state: &HttpState, prefix: &'static str, path: &str) -> Response {
    match state.site.read_asset(prefix, path).await {
        Ok(Some(bytes)) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(CONTENT_TYPE, mime.as_ref())], bytes).into_response()
        }
        Ok(None) | Err(SiteStoreError::InvalidPath) => {
            not_found_response("infra::http::public::asset", "Static asset not found")
        }
        Err(err) => internal_error_response("infra::http::public::asset", &err),
    }
}

fn not_found_response(source: &'static str, message: &'static str) -> Response {
    let mut response = (StatusCode::NOT_FOUND, message).into_response();
    ErrorReport::from_message(source, StatusCode::NOT_FOUND, message).attach(&mut response);
    response
}

fn internal_error_response(source: &'static str, error: &dyn StdError) -> Response {
    let mut response = (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response();
    ErrorReport::from_error(source, StatusCode::INTERNAL_SERVER_ERROR, error).attach(&mut response);
    response
}
