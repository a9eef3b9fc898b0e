//! Request handlers

use super::AppState;
use crate::errors::WorkflowError;
use crate::frame::{public_link, FrameView, TransactionDescriptor};
use crate::notifier::MentionPayload;
use crate::types::CastIdentifier;
use crate::workflow::{LaunchOutcome, LaunchRejection, LaunchStage};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use serde_json::{json, Value};
use tracing::{debug, error, warn};

/// Errors surfaced to HTTP callers as `{error, stage}` bodies
#[derive(Debug)]
pub enum ApiError {
    /// The workflow refused the launch
    Rejected(LaunchRejection),
    /// The cast cannot be used (unknown or unusable payload)
    BadCast(String),
    /// The social service or the chain could not be read
    Upstream(String),
    /// The launch key could not sign
    Signing(String),
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Social(e) if e.is_transient() => ApiError::Upstream(e.to_string()),
            WorkflowError::Social(e) => ApiError::BadCast(e.to_string()),
            WorkflowError::Chain(e) => ApiError::Upstream(e.to_string()),
            WorkflowError::Signing(e) => ApiError::Signing(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, stage, message) = match self {
            ApiError::Rejected(rejection) => (
                StatusCode::BAD_REQUEST,
                LaunchStage::AuthorizationFailed,
                rejection.to_string(),
            ),
            ApiError::BadCast(message) => {
                (StatusCode::BAD_REQUEST, LaunchStage::CastLookupFailed, message)
            }
            ApiError::Upstream(message) => {
                (StatusCode::BAD_GATEWAY, LaunchStage::CastLookupFailed, message)
            }
            ApiError::Signing(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                LaunchStage::AuthorizationFailed,
                message,
            ),
        };
        (status, Json(json!({"error": message, "stage": stage}))).into_response()
    }
}

pub async fn default_frame(State(state): State<AppState>) -> Response {
    render_frame(&state, None).await
}

/// Path segments owned by other routes under `/api`
const RESERVED_SEGMENTS: [&str; 2] = ["launch", "webhook"];

pub async fn cast_frame(State(state): State<AppState>, Path(cast): Path<String>) -> Response {
    if RESERVED_SEGMENTS.contains(&cast.as_str()) {
        debug!("Refusing to render reserved segment {} as a cast", cast);
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": format!("/api/{} needs a cast identifier", cast)})),
        )
            .into_response();
    }
    render_frame(&state, Some(CastIdentifier::new(cast))).await
}

async fn render_frame(state: &AppState, cast: Option<CastIdentifier>) -> Response {
    let post_url = match &cast {
        Some(cast) => public_link(&state.public_url, &["api", cast.as_str()]),
        None => public_link(&state.public_url, &["api"]),
    };

    let outcome = state.workflow.render_frame(cast).await;
    let view = FrameView::from_outcome(
        &outcome,
        &state.public_url,
        &state.workflow.settings().placeholder_image,
    );

    (
        [(header::CACHE_CONTROL, "no-store")],
        Html(view.to_html(&post_url)),
    )
        .into_response()
}

pub async fn launch_transaction(
    State(state): State<AppState>,
    Path(cast): Path<String>,
) -> Result<Json<TransactionDescriptor>, ApiError> {
    let outcome = state
        .workflow
        .build_launch(CastIdentifier::new(cast))
        .await
        .map_err(|e| {
            match &e {
                WorkflowError::Signing(_) => error!("Launch signing failed: {}", e),
                _ => warn!("Launch aborted: {}", e),
            }
            ApiError::from(e)
        })?;

    match outcome {
        LaunchOutcome::TransactionReady(tx) => Ok(Json(TransactionDescriptor::from_launch(&tx))),
        LaunchOutcome::AuthorizationFailed(rejection) => Err(ApiError::Rejected(rejection)),
    }
}

/// Always acknowledged; the sender does not act on our answer
pub async fn mention_webhook(State(state): State<AppState>, body: Bytes) -> &'static str {
    if let Some(payload) = MentionPayload::from_slice(&body) {
        state.notifier.on_mention(&payload).await;
    }
    "OK"
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "service": "cast-launcher"
    }))
}
