//! Port traits (interfaces for adapters).
//!
//! The application layer depends on these traits, not concrete implementations.

mod brokerage;

pub use brokerage::{BrokerageGateway, GatewayError};
