use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::{PriceRow, Ticker};

pub const EMPTY_RANGE_MESSAGE: &str = "해당 기간의 주가 데이터가 없습니다.";

/// Query string accepted by `/api/lookup` and `/api/export`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupParams {
    #[serde(default)]
    pub query: String,
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub end: Option<NaiveDate>,
}

// A cleared date picker submits `start=`; treat it like an absent bound.
fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("잘못된 날짜 형식입니다 ({}): {}", text, e))),
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolveParams {
    #[serde(default)]
    pub query: String,
}

/// Inclusive calendar range handed to the price provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Page default: January 1st of the current year through today.
    pub fn year_to_date(today: NaiveDate) -> Self {
        let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
        Self { start, end: today }
    }

    /// Fills missing bounds from `year_to_date` and rejects an end before the start.
    pub fn from_bounds(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, String> {
        let defaults = Self::year_to_date(today);
        let range = Self {
            start: start.unwrap_or(defaults.start),
            end: end.unwrap_or(defaults.end),
        };
        if range.end < range.start {
            return Err(format!(
                "종료일({})이 시작일({})보다 앞설 수 없습니다.",
                range.end, range.start
            ));
        }
        Ok(range)
    }

    /// `YYYYMMDD` pair as expected by the provider.
    pub fn compact_bounds(&self) -> (String, String) {
        (
            self.start.format("%Y%m%d").to_string(),
            self.end.format("%Y%m%d").to_string(),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub query: String,
    pub ticker: Ticker,
    pub notices: Vec<String>,
}

/// Success outcomes of a lookup. Errors travel as `LookupFailure`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupResponse {
    Rendered {
        query: String,
        ticker: Ticker,
        start: NaiveDate,
        end: NaiveDate,
        row_count: usize,
        figure: serde_json::Value,
        preview: Vec<PriceRow>,
        export_url: String,
        notices: Vec<String>,
    },
    Empty {
        query: String,
        ticker: Ticker,
        start: NaiveDate,
        end: NaiveDate,
        message: String,
        notices: Vec<String>,
    },
}
