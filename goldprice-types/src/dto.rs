//! Data Transfer Objects (DTOs) for the proxy's HTTP boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ConvertedQuote;

/// Path of the gold price endpoint. Any method is accepted.
pub const GOLD_PRICE_PATH: &str = "/api/kis-goldprice";

/// Message returned alongside a zero price.
pub const MARKET_CLOSED_MSG: &str = "Gold price is 0 KRW: market closed or no data";

/// Query parameters accepted by the gold price endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GoldPriceParams {
    /// Instrument identifier overriding the configured default
    #[param(example = "KR7064580005")]
    pub pdno: Option<String>,
}

/// Successful gold price response.
///
/// Built through [`GoldPriceResponse::priced`] or [`GoldPriceResponse::closed`]
/// so a converted price is never emitted without its upstream payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GoldPriceResponse {
    pub ok: bool,
    /// Instrument identifier that was quoted
    #[schema(example = "KR7064580005")]
    pub pdno: String,
    #[serde(rename = "priceKRWPerGram")]
    #[schema(example = 350000.0)]
    pub price_krw_per_gram: f64,
    #[serde(rename = "priceKRWPerOz")]
    #[schema(example = 10886216.88)]
    pub price_krw_per_oz: f64,
    /// Present only when the price is zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// Upstream quote payload, present only with a non-zero price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub raw: Option<Value>,
}

impl GoldPriceResponse {
    /// A live price paired with the payload it came from.
    pub fn priced(pdno: impl Into<String>, quote: ConvertedQuote, raw: Value) -> Self {
        Self {
            ok: true,
            pdno: pdno.into(),
            price_krw_per_gram: quote.per_gram(),
            price_krw_per_oz: quote.per_troy_ounce(),
            msg: None,
            raw: Some(raw),
        }
    }

    /// Zero price: market closed or no data.
    pub fn closed(pdno: impl Into<String>) -> Self {
        Self {
            ok: true,
            pdno: pdno.into(),
            price_krw_per_gram: 0.0,
            price_krw_per_oz: 0.0,
            msg: Some(MARKET_CLOSED_MSG.to_string()),
            raw: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.raw.is_none()
    }
}

/// Error body returned with every 4xx/5xx status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "KIS quote response missing output")]
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub detail: Option<Value>,
}
