//! # Gold Price Types
//!
//! Domain types and port traits for the gold price proxy.
//! This crate has ZERO external IO dependencies - only data structures,
//! upstream reply interpretation, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Credentials, instrument selection, prices and reply parsing
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AccessToken, ConvertedQuote, Credentials, GRAMS_PER_TROY_OUNCE, InstrumentSelector,
    QuoteQuery, UpstreamReply,
};
pub use dto::*;
pub use error::{AppError, QuoteError};
pub use ports::{BrokerageGateway, GatewayError};
