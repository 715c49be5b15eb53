use async_trait::async_trait;
use thiserror::Error;

use crate::models::DirectoryEntry;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("listing is missing column '{0}'")]
    Schema(String),
}

/// Source of the company-name to ticker table.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch_listing(&self) -> Result<Vec<DirectoryEntry>, ListingError>;
}
