//! Stub collaborators and router helpers shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use chrono::{Duration as ChronoDuration, NaiveDate};
use tower::ServiceExt;

use crate::app::create_app;
use crate::config::AppConfig;
use crate::external::listing_source::{ListingError, ListingSource};
use crate::external::price_provider::{PriceProvider, PriceProviderError};
use crate::models::{DirectoryEntry, PriceRow, Ticker};
use crate::services::company_directory::CompanyDirectory;
use crate::state::AppState;

pub fn samsung_directory() -> Vec<DirectoryEntry> {
    vec![DirectoryEntry::new("삼성전자", Ticker::parse("005930").unwrap())]
}

/// `n` consecutive days starting 2024-01-02 with a rising close.
pub fn sample_rows(n: usize) -> Vec<PriceRow> {
    let first = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let base = 78_000.0 + 100.0 * i as f64;
            PriceRow {
                date: first + ChronoDuration::days(i as i64),
                open: base,
                high: base + 500.0,
                low: base - 300.0,
                close: base + 200.0,
                volume: 10_000_000 + i as u64,
            }
        })
        .collect()
}

/// Listing source that counts how often it is asked.
pub struct CountingListing {
    entries: Option<Vec<DirectoryEntry>>,
    calls: AtomicUsize,
}

impl CountingListing {
    pub fn ok(entries: Vec<DirectoryEntry>) -> Self {
        Self {
            entries: Some(entries),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            entries: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ListingSource for CountingListing {
    async fn fetch_listing(&self) -> Result<Vec<DirectoryEntry>, ListingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // widen the window for concurrent first callers
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.entries
            .clone()
            .ok_or_else(|| ListingError::Network("connection refused".into()))
    }
}

/// Price provider returning canned rows, or failing, and remembering the last request.
pub struct StubPriceProvider {
    rows: Option<Vec<PriceRow>>,
    last_request: Mutex<Option<(String, String, String)>>,
}

impl StubPriceProvider {
    pub fn rows(rows: Vec<PriceRow>) -> Self {
        Self {
            rows: Some(rows),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            rows: None,
            last_request: Mutex::new(None),
        }
    }

    pub fn last_request(&self) -> Option<(String, String, String)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceProvider for StubPriceProvider {
    async fn fetch_daily_range(
        &self,
        ticker: &Ticker,
        start: &str,
        end: &str,
    ) -> Result<Vec<PriceRow>, PriceProviderError> {
        *self.last_request.lock().unwrap() =
            Some((ticker.to_string(), start.to_string(), end.to_string()));
        self.rows
            .clone()
            .ok_or_else(|| PriceProviderError::Network("upstream timed out".into()))
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        operator_name: "테스터".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        listing_url: "http://listing.invalid".to_string(),
        chart_url: "http://chart.invalid".to_string(),
        http_timeout: Duration::from_secs(1),
        candlestick_panel: true,
    }
}

pub fn test_app(listing: CountingListing, provider: StubPriceProvider) -> Router {
    create_app(AppState {
        config: Arc::new(test_config()),
        directory: Arc::new(CompanyDirectory::new(Arc::new(listing))),
        price_provider: Arc::new(provider),
    })
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
