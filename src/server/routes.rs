//! Route definitions

use super::{handlers::*, AppState};
use axum::routing::{get, post};
use axum::Router;

/// Frame renders, with and without an explicit cast
pub fn create_frame_routes() -> Router<AppState> {
    Router::new()
        .route("/api", get(default_frame).post(default_frame))
        .route("/api/:cast", get(cast_frame).post(cast_frame))
}

/// Transaction descriptor for the frame's `tx` button
pub fn create_launch_routes() -> Router<AppState> {
    Router::new().route("/api/launch/:cast", post(launch_transaction))
}

pub fn create_webhook_routes() -> Router<AppState> {
    Router::new().route("/api/webhook/mention", post(mention_webhook))
}
