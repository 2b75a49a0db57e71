//! Brokerage gateway port.
//!
//! Implementations perform the two outbound HTTP calls and return the raw
//! reply. They must not retry.

use crate::domain::{AccessToken, Credentials, QuoteQuery, UpstreamReply};

/// Error type for gateway transport failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Invalid upstream endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Upstream request failed: {0}")]
    Transport(String),
}

/// Port trait for the upstream brokerage API.
#[async_trait::async_trait]
pub trait BrokerageGateway: Send + Sync + 'static {
    /// Requests an access token with the client-credentials grant.
    async fn request_token(&self, credentials: &Credentials)
    -> Result<UpstreamReply, GatewayError>;

    /// Requests the current-price quote for an instrument.
    async fn request_quote(
        &self,
        credentials: &Credentials,
        token: &AccessToken,
        query: &QuoteQuery,
    ) -> Result<UpstreamReply, GatewayError>;
}
