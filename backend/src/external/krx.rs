use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, info};

use crate::external::listing_source::{ListingError, ListingSource};
use crate::models::{DirectoryEntry, Ticker};

pub const DEFAULT_LISTING_URL: &str =
    "http://kind.krx.co.kr/corpgeneral/corpList.do?method=download&searchType=13";

const NAME_COLUMN: &str = "회사명";
const CODE_COLUMN: &str = "종목코드";

/// Scrapes the KRX KIND listed-company download, an EUC-KR HTML table.
pub struct KrxListingSource {
    client: reqwest::Client,
    url: String,
}

impl KrxListingSource {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ListingSource for KrxListingSource {
    async fn fetch_listing(&self) -> Result<Vec<DirectoryEntry>, ListingError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ListingError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ListingError::BadResponse(format!(
                "listing returned HTTP {}",
                resp.status()
            )));
        }

        let html = resp
            .text_with_charset("euc-kr")
            .await
            .map_err(|e| ListingError::BadResponse(e.to_string()))?;

        let entries = parse_listing_html(&html)?;
        info!("Parsed {} listed companies from KRX", entries.len());
        Ok(entries)
    }
}

/// Extracts (회사명, 종목코드) pairs in table order.
///
/// The first row is the header; columns are located by name so reordering on
/// the upstream side does not break the scrape. Rows whose code is not a
/// six-digit number after zero padding are skipped.
pub fn parse_listing_html(html: &str) -> Result<Vec<DirectoryEntry>, ListingError> {
    let row_re = Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>")
        .map_err(|e| ListingError::BadResponse(e.to_string()))?;
    let cell_re = Regex::new(r"(?is)<t[hd][^>]*>(.*?)</t[hd]>")
        .map_err(|e| ListingError::BadResponse(e.to_string()))?;
    let tag_re = Regex::new(r"(?s)<[^>]*>").map_err(|e| ListingError::BadResponse(e.to_string()))?;
    let numeric_re = Regex::new(r"&#(?:[xX]([0-9a-fA-F]+)|([0-9]+));")
        .map_err(|e| ListingError::BadResponse(e.to_string()))?;

    let mut rows = row_re.captures_iter(html).map(|row| {
        cell_re
            .captures_iter(&row[1])
            .map(|cell| decode_entities(&numeric_re, tag_re.replace_all(&cell[1], "").trim()))
            .collect::<Vec<_>>()
    });

    let header = rows
        .next()
        .ok_or_else(|| ListingError::BadResponse("listing contains no table rows".into()))?;
    let column = |name: &str| {
        header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ListingError::Schema(name.to_string()))
    };
    let name_idx = column(NAME_COLUMN)?;
    let code_idx = column(CODE_COLUMN)?;

    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for cells in rows {
        let (Some(name), Some(code)) = (cells.get(name_idx), cells.get(code_idx)) else {
            skipped += 1;
            continue;
        };
        match Ticker::from_listing_code(code) {
            Some(ticker) if !name.is_empty() => entries.push(DirectoryEntry::new(name.clone(), ticker)),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} listing rows without a numeric ticker", skipped);
    }
    Ok(entries)
}

/// `&amp;` goes last so an escaped `&amp;#38;` stays literal.
fn decode_entities(numeric_re: &Regex, text: &str) -> String {
    let text = numeric_re.replace_all(text, |caps: &regex::Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (_, Some(dec)) => dec.as_str().parse::<u32>().ok(),
            _ => None,
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
