//! Interpretation of raw upstream replies.
//!
//! The outbound port hands back status and body text untouched; every rule
//! about what counts as a usable token or quote lives here.

use serde_json::Value;

use crate::domain::AccessToken;
use crate::error::QuoteError;

/// Raw HTTP reply from the brokerage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

impl UpstreamReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn parse_json(&self, what: &str) -> Result<Value, QuoteError> {
        serde_json::from_str(&self.body).map_err(|_| QuoteError::UpstreamParse {
            message: format!("Failed to parse {} response as JSON", what),
            raw: self.body.clone(),
        })
    }
}

/// Extracts the bearer token from a token-endpoint reply.
pub fn token_from_reply(reply: &UpstreamReply) -> Result<AccessToken, QuoteError> {
    let json = reply.parse_json("token")?;

    if !reply.is_success() {
        return Err(QuoteError::UpstreamRejection {
            message: format!("Token request failed with HTTP {}", reply.status),
            detail: json,
        });
    }

    match json
        .get("access_token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
    {
        Some(token) => Ok(AccessToken::new(token)),
        None => Err(QuoteError::UpstreamRejection {
            message: "Token issuance failed: response has no access_token".into(),
            detail: json,
        }),
    }
}

/// Validates a quote reply and returns the full payload.
///
/// The payload is guaranteed to carry an `output` object.
pub fn quote_payload(reply: &UpstreamReply) -> Result<Value, QuoteError> {
    let json = reply.parse_json("KIS quote")?;

    if !reply.is_success() {
        return Err(QuoteError::UpstreamRejection {
            message: format!("KIS quote request failed with HTTP {}", reply.status),
            detail: json,
        });
    }

    if let Some(code) = json.get("rt_cd") {
        if !is_success_code(code) {
            let code = code
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| code.to_string());
            let upstream_msg = json.get("msg1").and_then(Value::as_str).unwrap_or_default();
            let message = format!("KIS quote request rejected (rt_cd {}): {}", code, upstream_msg);
            return Err(QuoteError::UpstreamRejection {
                message: message.trim_end_matches([' ', ':']).to_string(),
                detail: json,
            });
        }
    }

    if !json.get("output").is_some_and(Value::is_object) {
        return Err(QuoteError::UpstreamRejection {
            message: "KIS quote response missing output".into(),
            detail: json,
        });
    }

    Ok(json)
}

fn is_success_code(code: &Value) -> bool {
    match code {
        Value::String(s) => s.trim() == "0",
        Value::Number(n) => n.as_u64() == Some(0),
        _ => false,
    }
}
