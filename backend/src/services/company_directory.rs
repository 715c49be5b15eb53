use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::errors::AppError;
use crate::external::listing_source::ListingSource;
use crate::models::DirectoryEntry;

/// The directory as loaded once for this process.
#[derive(Debug, Default)]
pub struct DirectorySnapshot {
    entries: Vec<DirectoryEntry>,
    notice: Option<String>,
}

impl DirectorySnapshot {
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Set when loading failed and an empty table was substituted.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Exact, case-sensitive match on the display name; first row in source order wins.
    pub fn find(&self, display_name: &str) -> Option<&DirectoryEntry> {
        self.entries.iter().find(|e| e.display_name == display_name)
    }
}

/// Lazily populated name-to-ticker table.
///
/// The listing is fetched on the first call to [`CompanyDirectory::snapshot`]
/// and reused until the process exits. A failed fetch is cached as an empty
/// table carrying a notice; it is never retried.
pub struct CompanyDirectory {
    source: Arc<dyn ListingSource>,
    cache: OnceCell<Arc<DirectorySnapshot>>,
}

impl CompanyDirectory {
    pub fn new(source: Arc<dyn ListingSource>) -> Self {
        Self {
            source,
            cache: OnceCell::new(),
        }
    }

    pub async fn snapshot(&self) -> Arc<DirectorySnapshot> {
        self.cache
            .get_or_init(|| async {
                let snapshot = match self.source.fetch_listing().await {
                    Ok(entries) => {
                        info!("📇 Company directory loaded with {} entries", entries.len());
                        DirectorySnapshot { entries, notice: None }
                    }
                    Err(e) => {
                        error!("Failed to load company directory: {}", e);
                        DirectorySnapshot {
                            entries: Vec::new(),
                            notice: Some(AppError::DirectoryUnavailable(e.to_string()).to_string()),
                        }
                    }
                };
                Arc::new(snapshot)
            })
            .await
            .clone()
    }

    /// The loaded snapshot, if any, without triggering a fetch.
    pub fn cached(&self) -> Option<Arc<DirectorySnapshot>> {
        self.cache.get().cloned()
    }
}
