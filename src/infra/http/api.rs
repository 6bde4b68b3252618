//! Content producer API: submit and list queued content items.
//!
//! The response envelope (`status`/`count` on success, a flat `error` string
//! on rejection) is wire-compatible with earlier deployments and must not
//! change shape.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use metrics::counter;
use serde::Serialize;
use serde_json::Value;

use crate::application::{content::ContentStore, error::ErrorReport};
use crate::domain::content::ContentItem;

use super::{RouterState, middleware::log_responses};

#[derive(Clone)]
pub struct ApiState {
    pub content: Arc<ContentStore>,
}

pub fn build_api_router(state: RouterState) -> Router<RouterState> {
    Router::new()
        .route("/api/inject", post(submit_content))
        .route("/api/content", get(list_content))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
}

#[derive(Debug, Serialize)]
struct SubmitContentResponse {
    status: &'static str,
    count: usize,
}

#[derive(Debug, Serialize)]
struct ContentListResponse {
    content: Vec<ContentItem>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    error: &'static str,
}

async fn submit_content(State(state): State<ApiState>, Json(payload): Json<Value>) -> Response {
    // The boundary validates key presence, not value shape: an explicit
    // `"target": null` passes here and is skipped by the compositor.
    if payload.get("target").is_none() {
        let mut response = (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorBody {
                error: "target field is required",
            }),
        )
            .into_response();
        ErrorReport::from_message(
            "infra::http::api::submit_content",
            StatusCode::BAD_REQUEST,
            "content item missing required `target`",
        )
        .attach(&mut response);
        return response;
    }

    let item: ContentItem = match serde_json::from_value(payload) {
        Ok(item) => item,
        Err(err) => {
            let mut response = (
                StatusCode::BAD_REQUEST,
                Json(ApiErrorBody {
                    error: "content item could not be parsed",
                }),
            )
                .into_response();
            ErrorReport::from_error(
                "infra::http::api::submit_content",
                StatusCode::BAD_REQUEST,
                &err,
            )
            .attach(&mut response);
            return response;
        }
    };

    let count = state.content.push(item);
    counter!("inlay_content_submitted_total").increment(1);

    Json(SubmitContentResponse {
        status: "ok",
        count,
    })
    .into_response()
}

async fn list_content(State(state): State<ApiState>) -> Json<ContentListResponse> {
    let content = state.content.snapshot();
    let count = content.len();
    Json(ContentListResponse { content, count })
}
