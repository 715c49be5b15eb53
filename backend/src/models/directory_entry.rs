use serde::Serialize;

use super::Ticker;

// One row of the listed-company directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub display_name: String,
    pub ticker_code: Ticker,
}

impl DirectoryEntry {
    pub fn new(display_name: impl Into<String>, ticker_code: Ticker) -> Self {
        Self {
            display_name: display_name.into(),
            ticker_code,
        }
    }
}
