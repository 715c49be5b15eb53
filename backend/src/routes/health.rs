use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/directory", get(directory_status))
}

async fn health() -> &'static str {
    info!("GET /health - Health check");
    "OK"
}

#[derive(Debug, Serialize)]
struct DirectoryStatus {
    loaded: bool,
    entries: Option<usize>,
    notice: Option<String>,
}

/// Reports the directory cache without triggering a load.
async fn directory_status(State(state): State<AppState>) -> Json<DirectoryStatus> {
    info!("GET /health/directory - Directory cache status");
    let status = match state.directory.cached() {
        Some(snapshot) => DirectoryStatus {
            loaded: true,
            entries: Some(snapshot.entries().len()),
            notice: snapshot.notice().map(str::to_string),
        },
        None => DirectoryStatus {
            loaded: false,
            entries: None,
            notice: None,
        },
    };
    Json(status)
}
