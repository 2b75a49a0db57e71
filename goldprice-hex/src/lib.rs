//! # Gold Price Hex
//!
//! Application service layer and HTTP adapter for the gold price proxy.
//!
//! ## Architecture
//!
//! - `service/` - Quote service (token -> quote -> convert)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served next to the API
//!
//! The service is generic over `G: BrokerageGateway`, allowing
//! different upstream adapters to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::{MISSING_CREDENTIALS_MSG, QuoteService, QuoteSettings};
