//! Price extraction and gram-to-troy-ounce conversion.

use serde_json::Value;

use crate::error::QuoteError;

/// Grams in one troy ounce.
pub const GRAMS_PER_TROY_OUNCE: f64 = 31.1034768;

/// Field of the quote `output` object holding the current price.
pub const CURRENT_PRICE_FIELD: &str = "stck_prpr";

/// A gram price and its troy-ounce equivalent.
///
/// Purely derived; never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertedQuote {
    per_gram: f64,
    per_troy_ounce: f64,
}

impl ConvertedQuote {
    pub fn from_gram_price(per_gram: f64) -> Self {
        Self {
            per_gram,
            per_troy_ounce: per_gram * GRAMS_PER_TROY_OUNCE,
        }
    }

    pub fn per_gram(&self) -> f64 {
        self.per_gram
    }

    pub fn per_troy_ounce(&self) -> f64 {
        self.per_troy_ounce
    }

    /// Zero means the market is closed or has no data.
    pub fn is_zero(&self) -> bool {
        self.per_gram == 0.0
    }
}

/// Reads the current price from a quote `output` object.
///
/// Accepts numeric strings with thousands separators (`"350,000"`) as well
/// as plain JSON numbers.
pub fn current_price(output: &Value) -> Result<f64, QuoteError> {
    let raw = match output.get(CURRENT_PRICE_FIELD) {
        None | Some(Value::Null) => {
            return Err(QuoteError::Data {
                message: format!(
                    "Current price field {} missing from quote output",
                    CURRENT_PRICE_FIELD
                ),
                detail: output.clone(),
            });
        }
        Some(raw) => raw,
    };

    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            cleaned.parse::<f64>().ok()
        }
        _ => None,
    };

    match parsed {
        Some(price) if price.is_finite() && price >= 0.0 => {
            // Normalises -0.0.
            Ok(if price == 0.0 { 0.0 } else { price })
        }
        _ => Err(QuoteError::Data {
            message: format!("Current price is not a valid number: {}", raw),
            detail: raw.clone(),
        }),
    }
}
