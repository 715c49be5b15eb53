use tracing::{debug, warn};

use crate::errors::{AppError, LookupFailure};
use crate::models::Ticker;
use crate::services::company_directory::CompanyDirectory;

#[derive(Debug)]
pub struct Resolution {
    pub ticker: Ticker,
    pub notices: Vec<String>,
}

/// Turns free-form input into a ticker.
///
/// Six ASCII digits are taken as a ticker as-is, without consulting the
/// directory (a company whose name is six digits can therefore never be
/// looked up by name). Anything else must match a directory display name
/// exactly.
pub async fn resolve(directory: &CompanyDirectory, input: &str) -> Result<Resolution, LookupFailure> {
    if let Some(ticker) = Ticker::parse(input) {
        debug!("'{}' is already a ticker", input);
        return Ok(Resolution {
            ticker,
            notices: Vec::new(),
        });
    }

    let snapshot = directory.snapshot().await;
    let notices: Vec<String> = snapshot.notice().map(str::to_string).into_iter().collect();

    match snapshot.find(input) {
        Some(entry) => {
            debug!("Resolved '{}' to {}", input, entry.ticker_code);
            Ok(Resolution {
                ticker: entry.ticker_code.clone(),
                notices,
            })
        }
        None => {
            warn!("No listed company named '{}'", input);
            Err(LookupFailure::new(AppError::NotFound(input.to_string()), notices))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{samsung_directory, CountingListing};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_six_digit_input_bypasses_directory() {
        let listing = Arc::new(CountingListing::ok(samsung_directory()));
        let directory = CompanyDirectory::new(listing.clone());

        for input in ["005930", "000000", "999999", "123456"] {
            let resolution = resolve(&directory, input).await.unwrap();
            assert_eq!(resolution.ticker.as_str(), input);
        }
        assert_eq!(listing.calls(), 0);
    }

    #[tokio::test]
    async fn test_name_resolves_through_directory() {
        let directory = CompanyDirectory::new(Arc::new(CountingListing::ok(samsung_directory())));

        let resolution = resolve(&directory, "삼성전자").await.unwrap();
        assert_eq!(resolution.ticker.as_str(), "005930");
        assert!(resolution.notices.is_empty());
    }

    #[tokio::test]
    async fn test_near_tickers_are_looked_up_as_names() {
        let listing = Arc::new(CountingListing::ok(samsung_directory()));
        let directory = CompanyDirectory::new(listing.clone());

        for input in ["05930", "0059300", "00593O"] {
            let failure = resolve(&directory, input).await.unwrap_err();
            assert!(matches!(failure.error, AppError::NotFound(ref q) if q == input));
        }
        assert_eq!(listing.calls(), 1);
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive_and_exact() {
        let directory = CompanyDirectory::new(Arc::new(CountingListing::ok(vec![
            crate::models::DirectoryEntry::new("NAVER", Ticker::parse("035420").unwrap()),
        ])));

        assert!(resolve(&directory, "NAVER").await.is_ok());
        assert!(resolve(&directory, "naver").await.is_err());
        assert!(resolve(&directory, "NAV").await.is_err());
    }

    #[tokio::test]
    async fn test_unavailable_directory_yields_not_found_with_notice() {
        let directory = CompanyDirectory::new(Arc::new(CountingListing::failing()));

        let failure = resolve(&directory, "삼성전자").await.unwrap_err();
        assert!(matches!(failure.error, AppError::NotFound(ref q) if q == "삼성전자"));
        assert_eq!(failure.notices.len(), 1);
    }
}
