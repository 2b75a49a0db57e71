//! Instrument selection for the quote request.

/// Market-division code for KRX-listed instruments.
pub const DEFAULT_MARKET_DIVISION: &str = "J";

/// KRX gold spot instrument.
pub const DEFAULT_PDNO: &str = "KR7064580005";

/// Transaction-type id of the current-price inquiry.
pub const DEFAULT_TR_ID: &str = "FHKST01010100";

/// Identifies which quote to request upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentSelector {
    pub market_division: String,
    pub pdno: String,
}

impl InstrumentSelector {
    pub fn new(market_division: impl Into<String>, pdno: impl Into<String>) -> Self {
        Self {
            market_division: market_division.into(),
            pdno: pdno.into(),
        }
    }
}

impl Default for InstrumentSelector {
    fn default() -> Self {
        Self::new(DEFAULT_MARKET_DIVISION, DEFAULT_PDNO)
    }
}

/// Everything the quote endpoint needs besides credentials and token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteQuery {
    pub selector: InstrumentSelector,
    pub tr_id: String,
}
