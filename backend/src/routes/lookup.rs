use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::errors::{AppError, LookupFailure};
use crate::models::{
    DateRange, LookupParams, LookupResponse, ResolveParams, ResolveResponse, EMPTY_RANGE_MESSAGE,
};
use crate::services::{lookup_service, presentation_service, ticker_resolver};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lookup", get(lookup))
        .route("/resolve", get(resolve))
}

/// GET /api/lookup?query=삼성전자&start=2024-01-01&end=2024-06-30
async fn lookup(
    State(state): State<AppState>,
    params: Result<Query<LookupParams>, QueryRejection>,
) -> Result<Json<LookupResponse>, LookupFailure> {
    let Query(params) = params.map_err(AppError::from)?;
    info!("GET /api/lookup - query='{}' start={:?} end={:?}", params.query, params.start, params.end);

    let query = lookup_service::validate_query(&params.query)?;
    let range = DateRange::from_bounds(params.start, params.end, chrono::Local::now().date_naive())
        .map_err(AppError::from)?;

    let lookup = lookup_service::run(&state.directory, state.price_provider.as_ref(), &query, range).await?;
    let range = lookup.range;

    if lookup.is_empty() {
        info!("No rows for '{}' in {}..{}", lookup.query, range.start, range.end);
        return Ok(Json(LookupResponse::Empty {
            query: lookup.query,
            ticker: lookup.ticker,
            start: range.start,
            end: range.end,
            message: EMPTY_RANGE_MESSAGE.to_string(),
            notices: lookup.notices,
        }));
    }

    let figure = presentation_service::build_figure(&lookup.query, &lookup.rows, state.config.candlestick_panel);
    let preview = presentation_service::preview(&lookup.rows);
    let export_url = export_url(&lookup.query, &range);

    Ok(Json(LookupResponse::Rendered {
        row_count: lookup.rows.len(),
        query: lookup.query,
        ticker: lookup.ticker,
        start: range.start,
        end: range.end,
        figure,
        preview,
        export_url,
        notices: lookup.notices,
    }))
}

/// GET /api/resolve?query=삼성전자
async fn resolve(
    State(state): State<AppState>,
    params: Result<Query<ResolveParams>, QueryRejection>,
) -> Result<Json<ResolveResponse>, LookupFailure> {
    let Query(params) = params.map_err(AppError::from)?;
    info!("GET /api/resolve - query='{}'", params.query);

    let query = lookup_service::validate_query(&params.query)?;
    let resolution = ticker_resolver::resolve(&state.directory, &query).await?;

    Ok(Json(ResolveResponse {
        query,
        ticker: resolution.ticker,
        notices: resolution.notices,
    }))
}

fn export_url(query: &str, range: &DateRange) -> String {
    let qs = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("query", query)
        .append_pair("start", &range.start.to_string())
        .append_pair("end", &range.end.to_string())
        .finish();
    format!("/api/export?{}", qs)
}
