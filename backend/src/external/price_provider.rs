use async_trait::async_trait;
use thiserror::Error;

use crate::models::{PriceRow, Ticker};

#[derive(Debug, Error)]
pub enum PriceProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Daily rows for `ticker` between `start` and `end` (inclusive, `YYYYMMDD`),
    /// oldest first. An empty vector means the range holds no trading data.
    async fn fetch_daily_range(
        &self,
        ticker: &Ticker,
        start: &str,
        end: &str,
    ) -> Result<Vec<PriceRow>, PriceProviderError>;
}
