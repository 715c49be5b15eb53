use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{anyhow, Context};

use crate::external::krx::DEFAULT_LISTING_URL;
use crate::external::naver::DEFAULT_CHART_URL;

pub const DEFAULT_OPERATOR_NAME: &str = "투자자";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub operator_name: String,
    pub bind_addr: SocketAddr,
    pub listing_url: String,
    pub chart_url: String,
    pub http_timeout: Duration,
    pub candlestick_panel: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .context("BIND_ADDR must be host:port")?;

        let timeout_secs: u64 = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("HTTP_TIMEOUT_SECS is not a number: {}", raw))?,
            None => 30,
        };

        let candlestick_panel = match get("CHART_CANDLESTICK").as_deref() {
            None => true,
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => return Err(anyhow!("CHART_CANDLESTICK must be true or false, got {}", other)),
        };

        Ok(Self {
            operator_name: get("MY_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_OPERATOR_NAME.to_string()),
            bind_addr,
            listing_url: get("KRX_LISTING_URL").unwrap_or_else(|| DEFAULT_LISTING_URL.to_string()),
            chart_url: get("NAVER_CHART_URL").unwrap_or_else(|| DEFAULT_CHART_URL.to_string()),
            http_timeout: Duration::from_secs(timeout_secs),
            candlestick_panel,
        })
    }
}
