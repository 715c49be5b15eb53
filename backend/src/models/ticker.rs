use std::fmt;

use serde::{Deserialize, Serialize};

pub const TICKER_LEN: usize = 6;

/// A six-digit exchange code such as `005930`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Accepts only exactly six ASCII digits.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() == TICKER_LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    /// Left-pads a listing code with zeros (`5930` -> `005930`) before validating it.
    pub fn from_listing_code(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Self::parse(&format!("{:0>width$}", trimmed, width = TICKER_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
