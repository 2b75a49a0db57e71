//! # Gold Price Client SDK
//!
//! A typed Rust client for the gold price proxy.

use goldprice_types::{ErrorBody, GoldPriceResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use goldprice_types::GOLD_PRICE_PATH;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
        detail: Option<Value>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Gold price proxy client.
pub struct GoldPriceClient {
    base_url: String,
    http: Client,
}

impl GoldPriceClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Fetches the gold price, optionally for another instrument.
    pub async fn gold_price(&self, pdno: Option<&str>) -> Result<GoldPriceResponse, ClientError> {
        let mut req = self.http.get(format!("{}{}", self.base_url, GOLD_PRICE_PATH));
        if let Some(pdno) = pdno {
            req = req.query(&[("pdno", pdno)]);
        }
        Self::handle_response(req.send().await?).await
    }

    async fn handle_response<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        let text = resp.text().await?;

        if status.is_success() {
            Ok(serde_json::from_str(&text)?)
        } else {
            let (message, detail) = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => (body.error, body.detail),
                Err(_) => (text, None),
            };
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
                detail,
            })
        }
    }
}
