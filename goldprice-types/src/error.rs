//! Error types for the gold price proxy.

use serde_json::Value;

/// Failures along the token -> quote -> convert chain.
///
/// Every variant is terminal for the request that produced it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuoteError {
    /// Missing credentials or instrument. No upstream call was made.
    #[error("{0}")]
    Configuration(String),

    /// Upstream body was not JSON; `raw` is the text as received.
    #[error("{message}")]
    UpstreamParse { message: String, raw: String },

    /// Non-success status or missing required field upstream.
    #[error("{message}")]
    UpstreamRejection { message: String, detail: Value },

    /// Price field missing or not numeric.
    #[error("{message}")]
    Data { message: String, detail: Value },

    /// Transport failures and anything else unexpected.
    #[error("{0}")]
    Unhandled(String),
}

impl From<crate::ports::GatewayError> for QuoteError {
    fn from(err: crate::ports::GatewayError) -> Self {
        QuoteError::Unhandled(err.to_string())
    }
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        detail: Option<Value>,
    },
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::Configuration(msg) => AppError::BadRequest(msg),
            QuoteError::UpstreamParse { message, raw } => AppError::Internal {
                message,
                detail: Some(Value::String(raw)),
            },
            QuoteError::UpstreamRejection { message, detail }
            | QuoteError::Data { message, detail } => AppError::Internal {
                message,
                detail: Some(detail),
            },
            QuoteError::Unhandled(message) => AppError::Internal {
                message,
                detail: None,
            },
        }
    }
}
