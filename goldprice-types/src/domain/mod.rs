//! Domain models for the gold price proxy.

pub mod credentials;
pub mod instrument;
pub mod price;
pub mod reply;

pub use credentials::{AccessToken, Credentials};
pub use instrument::{
    DEFAULT_MARKET_DIVISION, DEFAULT_PDNO, DEFAULT_TR_ID, InstrumentSelector, QuoteQuery,
};
pub use price::{ConvertedQuote, GRAMS_PER_TROY_OUNCE, current_price};
pub use reply::{UpstreamReply, quote_payload, token_from_reply};
