use tracing::{error, info};

use crate::errors::{AppError, LookupFailure};
use crate::external::price_provider::PriceProvider;
use crate::models::{DateRange, PriceRow, Ticker};
use crate::services::company_directory::CompanyDirectory;
use crate::services::ticker_resolver;

/// A resolved and fetched price series, before any presentation.
#[derive(Debug)]
pub struct Lookup {
    pub query: String,
    pub ticker: Ticker,
    pub range: DateRange,
    pub rows: Vec<PriceRow>,
    pub notices: Vec<String>,
}

impl Lookup {
    /// Valid ticker and range, but the provider had no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Trims the query and rejects empty input.
pub fn validate_query(raw: &str) -> Result<String, AppError> {
    let query = raw.trim();
    if query.is_empty() {
        return Err(AppError::Validation("조회할 회사 이름을 입력하세요.".to_string()));
    }
    Ok(query.to_string())
}

/// Resolve the ticker, then fetch the series for the range.
pub async fn run(
    directory: &CompanyDirectory,
    provider: &dyn PriceProvider,
    query: &str,
    range: DateRange,
) -> Result<Lookup, LookupFailure> {
    let resolution = ticker_resolver::resolve(directory, query).await?;
    let (start, end) = range.compact_bounds();

    let rows = match provider.fetch_daily_range(&resolution.ticker, &start, &end).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Price fetch failed for {} ({}..{}): {}", resolution.ticker, start, end, e);
            return Err(LookupFailure::new(
                AppError::FetchFailure(e.to_string()),
                resolution.notices,
            ));
        }
    };

    info!(
        "Fetched {} rows for '{}' ({}) {}..{}",
        rows.len(),
        query,
        resolution.ticker,
        start,
        end
    );

    Ok(Lookup {
        query: query.to_string(),
        ticker: resolution.ticker,
        range,
        rows,
        notices: resolution.notices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_rows, samsung_directory, CountingListing, StubPriceProvider};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn january() -> DateRange {
        DateRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        }
    }

    #[test]
    fn test_blank_query_is_rejected() {
        assert!(matches!(validate_query("   "), Err(AppError::Validation(_))));
        assert_eq!(validate_query(" 삼성전자 ").unwrap(), "삼성전자");
    }

    #[tokio::test]
    async fn test_zero_rows_is_empty_outcome_not_error() {
        let directory = CompanyDirectory::new(Arc::new(CountingListing::ok(vec![])));
        let provider = StubPriceProvider::rows(vec![]);

        let lookup = run(&directory, &provider, "005930", january()).await.unwrap();

        assert!(lookup.is_empty());
        assert_eq!(lookup.ticker.as_str(), "005930");
        assert_eq!(
            provider.last_request(),
            Some(("005930".to_string(), "20240101".to_string(), "20240102".to_string()))
        );
    }

    #[tokio::test]
    async fn test_provider_error_becomes_fetch_failure() {
        let directory = CompanyDirectory::new(Arc::new(CountingListing::ok(vec![])));
        let provider = StubPriceProvider::failing();

        let failure = run(&directory, &provider, "005930", january()).await.unwrap_err();
        assert!(matches!(failure.error, AppError::FetchFailure(_)));
    }

    #[tokio::test]
    async fn test_unknown_name_never_reaches_provider() {
        let directory = CompanyDirectory::new(Arc::new(CountingListing::ok(samsung_directory())));
        let provider = StubPriceProvider::rows(sample_rows(3));

        let failure = run(&directory, &provider, "없는회사", january()).await.unwrap_err();
        assert!(matches!(failure.error, AppError::NotFound(_)));
        assert_eq!(provider.last_request(), None);
    }

    #[tokio::test]
    async fn test_name_lookup_fetches_resolved_ticker() {
        let directory = CompanyDirectory::new(Arc::new(CountingListing::ok(samsung_directory())));
        let provider = StubPriceProvider::rows(sample_rows(3));

        let lookup = run(&directory, &provider, "삼성전자", january()).await.unwrap();
        assert_eq!(lookup.ticker.as_str(), "005930");
        assert_eq!(lookup.rows.len(), 3);
        assert_eq!(provider.last_request().unwrap().0, "005930");
    }
}
