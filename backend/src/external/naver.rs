use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::external::price_provider::{PriceProvider, PriceProviderError};
use crate::models::{PriceRow, Ticker};

pub const DEFAULT_CHART_URL: &str = "https://api.finance.naver.com/siseJson.naver";

/// Daily OHLCV from Naver's chart endpoint.
///
/// The body is a JavaScript array literal, not JSON: the header row uses
/// single quotes and the data rows look like
/// `["20240102", 78200, 79800, 78200, 79600, 17142847, 53.45]`.
pub struct NaverPriceProvider {
    client: reqwest::Client,
    url: String,
}

impl NaverPriceProvider {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl PriceProvider for NaverPriceProvider {
    async fn fetch_daily_range(
        &self,
        ticker: &Ticker,
        start: &str,
        end: &str,
    ) -> Result<Vec<PriceRow>, PriceProviderError> {
        let resp = self
            .client
            .get(&self.url)
            .query(&[
                ("symbol", ticker.as_str()),
                ("requestType", "1"),
                ("startTime", start),
                ("endTime", end),
                ("timeframe", "day"),
            ])
            .send()
            .await
            .map_err(|e| PriceProviderError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PriceProviderError::RateLimited);
        }
        if !resp.status().is_success() {
            return Err(PriceProviderError::BadResponse(format!(
                "chart endpoint returned HTTP {}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| PriceProviderError::Network(e.to_string()))?;

        let rows = parse_chart_body(&body)?;
        debug!("Naver returned {} rows for {} ({}..{})", rows.len(), ticker, start, end);
        Ok(rows)
    }
}

pub fn parse_chart_body(body: &str) -> Result<Vec<PriceRow>, PriceProviderError> {
    let trimmed = body.trim();
    if !trimmed.starts_with('[') {
        return Err(PriceProviderError::Parse(
            "chart body is not an array literal".into(),
        ));
    }

    let row_re = Regex::new(
        r#"\[\s*"(\d{8})"\s*,\s*([-\d.]+)\s*,\s*([-\d.]+)\s*,\s*([-\d.]+)\s*,\s*([-\d.]+)\s*,\s*([\d.]+)"#,
    )
    .map_err(|e| PriceProviderError::Parse(e.to_string()))?;

    let number = |raw: &str| {
        raw.parse::<f64>()
            .map_err(|e| PriceProviderError::Parse(format!("'{}': {}", raw, e)))
    };

    let mut rows = row_re
        .captures_iter(trimmed)
        .map(|caps| -> Result<PriceRow, PriceProviderError> {
            let date = NaiveDate::parse_from_str(&caps[1], "%Y%m%d")
                .map_err(|e| PriceProviderError::Parse(e.to_string()))?;
            Ok(PriceRow {
                date,
                open: number(&caps[2])?,
                high: number(&caps[3])?,
                low: number(&caps[4])?,
                close: number(&caps[5])?,
                volume: number(&caps[6])? as u64,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    rows.sort_by_key(|r| r.date);
    Ok(rows)
}
