use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: String,
    pub loki_url: Option<String>,
    pub service_name: String,
    pub environment: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let loki_enabled = get("LOKI_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            filter: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            loki_url: if loki_enabled { get("LOKI_URL") } else { None },
            service_name: get("SERVICE_NAME").unwrap_or_else(|| "stocklens".to_string()),
            environment: get("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        }
    }
}

/// Installs the global subscriber. Must run inside the tokio runtime when
/// Loki shipping is enabled, since its background task is spawned here.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.filter)?)
        .with(tracing_subscriber::fmt::layer());

    #[cfg(feature = "loki")]
    {
        if let Some(loki_url) = &config.loki_url {
            let (loki_layer, task) = tracing_loki::builder()
                .label("service", &config.service_name)?
                .label("environment", &config.environment)?
                .build_url(url::Url::parse(loki_url)?)?;
            tokio::spawn(task);
            registry.with(loki_layer).try_init()?;
            tracing::info!("📊 Logging to console and Loki at {}", loki_url);
            return Ok(());
        }
    }

    registry.try_init()?;
    tracing::info!("📊 Logging to console ({})", config.environment);
    Ok(())
}
