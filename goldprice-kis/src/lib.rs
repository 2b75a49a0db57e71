//! # KIS Gateway
//!
//! Outbound adapter implementing the `BrokerageGateway` port against the
//! Korea Investment & Securities open API.
//!
//! The adapter only moves bytes: it sends the token and quote requests and
//! hands back status and body text. Interpretation happens in the domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::{debug, info, instrument};

use goldprice_types::{
    AccessToken, BrokerageGateway, Credentials, GatewayError, QuoteQuery, UpstreamReply,
};

/// Production host of the KIS open API.
pub const DEFAULT_BASE_URL: &str = "https://openapi.koreainvestment.com:9443";

/// OAuth token endpoint.
pub const TOKEN_PATH: &str = "/oauth2/tokenP";

/// Domestic current-price inquiry endpoint.
pub const QUOTE_PATH: &str = "/uapi/domestic-stock/v1/quotations/inquire-price";

#[derive(Serialize)]
struct TokenRequestBody<'a> {
    grant_type: &'static str,
    appkey: &'a str,
    appsecret: &'a str,
}

/// `reqwest`-backed gateway. Cheap to clone; clones share a connection pool.
#[derive(Debug, Clone)]
pub struct KisGateway {
    http: Client,
    base_url: Url,
}

impl KisGateway {
    /// Creates a gateway for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| GatewayError::InvalidEndpoint(format!("{}: {}", base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(GatewayError::InvalidEndpoint(format!(
                "{}: scheme must be http or https",
                base_url
            )));
        }
        // Upstream paths are absolute, so a prefix here would be dropped on join.
        if base_url.path() != "/" || base_url.query().is_some() || base_url.fragment().is_some() {
            return Err(GatewayError::InvalidEndpoint(format!(
                "{}: must be a bare origin without path, query or fragment",
                base_url
            )));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// Origin the upstream paths are joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path)
            .map_err(|e| GatewayError::InvalidEndpoint(format!("{}: {}", path, e)))
    }

    async fn read_reply(
        what: &str,
        response: reqwest::Response,
    ) -> Result<UpstreamReply, GatewayError> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            GatewayError::Transport(format!("Failed to read {} response: {}", what, e))
        })?;
        debug!(status, bytes = body.len(), "{} response received", what);
        Ok(UpstreamReply::new(status, body))
    }
}

#[async_trait]
impl BrokerageGateway for KisGateway {
    #[instrument(skip_all)]
    async fn request_token(
        &self,
        credentials: &Credentials,
    ) -> Result<UpstreamReply, GatewayError> {
        let url = self.endpoint(TOKEN_PATH)?;
        info!("Requesting KIS access token");

        let body = TokenRequestBody {
            grant_type: "client_credentials",
            appkey: credentials.app_key(),
            appsecret: credentials.app_secret(),
        };

        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("Token request failed: {}", e)))?;

        Self::read_reply("token", response).await
    }

    #[instrument(skip_all, fields(pdno = %query.selector.pdno, tr_id = %query.tr_id))]
    async fn request_quote(
        &self,
        credentials: &Credentials,
        token: &AccessToken,
        query: &QuoteQuery,
    ) -> Result<UpstreamReply, GatewayError> {
        let url = self.endpoint(QUOTE_PATH)?;
        info!("Requesting KIS gold quote");

        let response = self
            .http
            .get(url)
            .query(&[
                ("FID_COND_MRKT_DIV_CODE", query.selector.market_division.as_str()),
                ("FID_INPUT_ISCD", query.selector.pdno.as_str()),
            ])
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, token.bearer())
            .header("appkey", credentials.app_key())
            .header("appsecret", credentials.app_secret())
            .header("tr_id", query.tr_id.as_str())
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("Quote request failed: {}", e)))?;

        Self::read_reply("quote", response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url_accepted() {
        let gateway = KisGateway::new(DEFAULT_BASE_URL, Duration::from_secs(5)).unwrap();
        assert_eq!(
            gateway.endpoint(TOKEN_PATH).unwrap().as_str(),
            "https://openapi.koreainvestment.com:9443/oauth2/tokenP"
        );
    }

    #[test]
    fn test_trailing_slash_ignored() {
        let gateway = KisGateway::new("http://localhost:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            gateway.endpoint(QUOTE_PATH).unwrap().as_str(),
            "http://localhost:8080/uapi/domestic-stock/v1/quotations/inquire-price"
        );
    }

    #[test]
    fn test_base_url_normalised_to_origin() {
        let gateway = KisGateway::new("http://127.0.0.1:9443", Duration::from_secs(5)).unwrap();
        assert_eq!(gateway.base_url().as_str(), "http://127.0.0.1:9443/");
    }

    #[test]
    fn test_rejects_base_url_with_path_prefix() {
        for url in [
            "http://localhost:8080/kis",
            "http://localhost:8080/kis/",
            "http://localhost:8080/?env=paper",
            "http://localhost:8080/#frag",
        ] {
            assert!(
                matches!(
                    KisGateway::new(url, Duration::from_secs(5)),
                    Err(GatewayError::InvalidEndpoint(_))
                ),
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_bad_endpoints() {
        assert!(matches!(
            KisGateway::new("not a url", Duration::from_secs(5)),
            Err(GatewayError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            KisGateway::new("ftp://example.com", Duration::from_secs(5)),
            Err(GatewayError::InvalidEndpoint(_))
        ));
    }
}
