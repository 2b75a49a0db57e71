//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use goldprice_hex::QuoteSettings;
use goldprice_kis::DEFAULT_BASE_URL;
use goldprice_types::Credentials;
use goldprice_types::domain::{DEFAULT_MARKET_DIVISION, DEFAULT_PDNO, DEFAULT_TR_ID};

/// Application configuration.
///
/// Missing credentials are not a startup error: the service rejects each
/// request with 400 until they are provided.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub kis_base_url: String,
    pub http_timeout: Duration,
    pub quote: QuoteSettings,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?;

        let kis_base_url = var("KIS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !kis_base_url.starts_with("http://") && !kis_base_url.starts_with("https://") {
            anyhow::bail!("KIS_BASE_URL must start with http:// or https://");
        }

        let timeout_secs: u64 = var("KIS_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("KIS_HTTP_TIMEOUT_SECS must be a whole number of seconds"))?;
        if timeout_secs == 0 {
            anyhow::bail!("KIS_HTTP_TIMEOUT_SECS must be greater than zero");
        }

        let credentials = Credentials::from_parts(
            var("KIS_APP_KEY").as_deref(),
            var("KIS_APP_SECRET").as_deref(),
        );

        let quote = QuoteSettings {
            credentials,
            default_pdno: var("KIS_GOLD_PDNO").unwrap_or_else(|| DEFAULT_PDNO.to_string()),
            market_division: var("KIS_MARKET_DIV")
                .unwrap_or_else(|| DEFAULT_MARKET_DIVISION.to_string()),
            tr_id: var("KIS_TR_ID").unwrap_or_else(|| DEFAULT_TR_ID.to_string()),
        };

        Ok(Self {
            port,
            kis_base_url,
            http_timeout: Duration::from_secs(timeout_secs),
            quote,
        })
    }
}
