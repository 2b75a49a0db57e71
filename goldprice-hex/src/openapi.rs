//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use goldprice_types::dto::{ErrorBody, GoldPriceParams, GoldPriceResponse};
use utoipa::OpenApi;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Current gold price in KRW per gram and per troy ounce.
///
/// Any HTTP method is accepted and the request body is ignored; the common
/// methods are listed here. A zero price means the market is closed; the
/// response then carries `msg` instead of `raw`.
#[utoipa::path(
    method(get, post, put, delete, patch),
    path = "/api/kis-goldprice",
    tag = "quotes",
    params(GoldPriceParams),
    responses(
        (status = 200, description = "Converted gold price", body = GoldPriceResponse),
        (status = 400, description = "Credentials or instrument identifier missing", body = ErrorBody),
        (status = 500, description = "Upstream failure; `detail` carries the upstream text or payload", body = ErrorBody)
    )
)]
async fn gold_price() {}

/// OpenAPI documentation for the gold price proxy.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "KIS Gold Price Proxy",
        version = "0.1.0",
        description = "Fetches the KRX gold spot price from the Korea Investment & Securities open API and converts it from KRW per gram to KRW per troy ounce (31.1034768 g).",
        license(name = "MIT"),
    ),
    paths(health, gold_price),
    components(schemas(GoldPriceResponse, ErrorBody)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "quotes", description = "Gold price quotes"),
    )
)]
pub struct ApiDoc;
