//! Quote Application Service
//!
//! Orchestrates one gold price lookup through the brokerage port.
//! Contains NO infrastructure logic - pure orchestration.

use tracing::{info, warn};

use goldprice_types::domain::{
    DEFAULT_MARKET_DIVISION, DEFAULT_PDNO, DEFAULT_TR_ID, current_price, quote_payload,
    token_from_reply,
};
use goldprice_types::{
    BrokerageGateway, ConvertedQuote, Credentials, GoldPriceResponse, InstrumentSelector,
    QuoteError, QuoteQuery,
};

pub const MISSING_CREDENTIALS_MSG: &str =
    "Missing environment variables: KIS_APP_KEY / KIS_APP_SECRET are not set";

pub const MISSING_PDNO_MSG: &str = "Instrument identifier (pdno) is required";

/// Per-process settings consulted on every request.
#[derive(Debug, Clone)]
pub struct QuoteSettings {
    /// `None` when key or secret is unset; requests are then rejected.
    pub credentials: Option<Credentials>,
    pub default_pdno: String,
    pub market_division: String,
    pub tr_id: String,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            credentials: None,
            default_pdno: DEFAULT_PDNO.to_string(),
            market_division: DEFAULT_MARKET_DIVISION.to_string(),
            tr_id: DEFAULT_TR_ID.to_string(),
        }
    }
}

impl QuoteSettings {
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
            ..Self::default()
        }
    }
}

/// Application service for gold price lookups.
///
/// Generic over `G: BrokerageGateway` - the adapter is injected at compile time.
/// Holds no mutable state: every call fetches a fresh token and quote.
pub struct QuoteService<G: BrokerageGateway> {
    gateway: G,
    settings: QuoteSettings,
}

impl<G: BrokerageGateway> QuoteService<G> {
    pub fn new(gateway: G, settings: QuoteSettings) -> Self {
        Self { gateway, settings }
    }

    /// Returns a reference to the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Picks the instrument: request override, else configured default.
    ///
    /// An override that is present but blank is rejected.
    fn resolve_pdno(&self, pdno_override: Option<&str>) -> Result<String, QuoteError> {
        let pdno = match pdno_override {
            Some(pdno) => pdno.trim(),
            None => self.settings.default_pdno.trim(),
        };
        if pdno.is_empty() {
            return Err(QuoteError::Configuration(MISSING_PDNO_MSG.into()));
        }
        Ok(pdno.to_string())
    }

    /// Fetches the current gold price and converts it to KRW per troy ounce.
    ///
    /// Each upstream endpoint is called at most once.
    #[tracing::instrument(skip(self))]
    pub async fn gold_price(
        &self,
        pdno_override: Option<&str>,
    ) -> Result<GoldPriceResponse, QuoteError> {
        let credentials = self
            .settings
            .credentials
            .as_ref()
            .ok_or_else(|| QuoteError::Configuration(MISSING_CREDENTIALS_MSG.into()))?;
        let pdno = self.resolve_pdno(pdno_override)?;

        let token_reply = self.gateway.request_token(credentials).await?;
        let token = token_from_reply(&token_reply).inspect_err(|e| {
            warn!(status = token_reply.status, "Token issuance failed: {}", e);
        })?;

        let query = QuoteQuery {
            selector: InstrumentSelector::new(self.settings.market_division.clone(), pdno.clone()),
            tr_id: self.settings.tr_id.clone(),
        };
        let quote_reply = self.gateway.request_quote(credentials, &token, &query).await?;
        let payload = quote_payload(&quote_reply).inspect_err(|e| {
            warn!(status = quote_reply.status, "Quote rejected: {}", e);
        })?;

        let price = current_price(&payload["output"])?;
        let quote = ConvertedQuote::from_gram_price(price);

        if quote.is_zero() {
            info!(%pdno, "Gold price is zero: market closed or no data");
            return Ok(GoldPriceResponse::closed(pdno));
        }

        info!(
            %pdno,
            per_gram = quote.per_gram(),
            per_troy_ounce = quote.per_troy_ounce(),
            "Gold price converted"
        );
        Ok(GoldPriceResponse::priced(pdno, quote, payload))
    }
}
