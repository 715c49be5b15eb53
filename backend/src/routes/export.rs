use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use http::header;
use tracing::{error, info};

use crate::errors::{AppError, LookupFailure};
use crate::models::{DateRange, LookupParams};
use crate::services::export_service::{self, EXPORT_MIME};
use crate::services::lookup_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/export", get(export))
}

/// GET /api/export?query=삼성전자&start=2024-01-01&end=2024-06-30
///
/// Re-runs the lookup and streams the whole series as an XLSX attachment.
/// An empty range has nothing to download and answers 204.
async fn export(
    State(state): State<AppState>,
    params: Result<Query<LookupParams>, QueryRejection>,
) -> Result<Response, LookupFailure> {
    let Query(params) = params.map_err(AppError::from)?;
    info!("GET /api/export - query='{}' start={:?} end={:?}", params.query, params.start, params.end);

    let query = lookup_service::validate_query(&params.query)?;
    let range = DateRange::from_bounds(params.start, params.end, chrono::Local::now().date_naive())
        .map_err(AppError::from)?;

    let lookup = lookup_service::run(&state.directory, state.price_provider.as_ref(), &query, range).await?;
    if lookup.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let export = export_service::export(&lookup.query, &lookup.rows).map_err(|e| {
        error!("Failed to build workbook for '{}': {}", lookup.query, e);
        LookupFailure::new(e, lookup.notices.clone())
    })?;

    info!(
        "📥 Exporting {} rows for {}..{} as {}",
        lookup.rows.len(),
        lookup.range.start,
        lookup.range.end,
        export.file_name
    );
    let disposition = content_disposition(&export.file_name, lookup.ticker.as_str());

    Ok((
        [
            (header::CONTENT_TYPE, EXPORT_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.bytes,
    )
        .into_response())
}

/// Korean file names need the RFC 5987 `filename*` form; the plain
/// `filename` falls back to the ticker for old clients.
fn content_disposition(file_name: &str, ticker: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(file_name.as_bytes()).collect();
    format!(
        "attachment; filename=\"{}.xlsx\"; filename*=UTF-8''{}",
        ticker,
        encoded.replace('+', "%20")
    )
}
