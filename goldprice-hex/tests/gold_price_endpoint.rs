//! HTTP-level tests for the gold price endpoint.
//!
//! These drive the full router (trace, CORS, panic catching) with a canned
//! gateway and check status codes and JSON shapes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use goldprice_hex::{QuoteService, QuoteSettings, inbound::HttpServer};
use goldprice_types::{
    AccessToken, BrokerageGateway, Credentials, GOLD_PRICE_PATH, GatewayError, MARKET_CLOSED_MSG,
    QuoteQuery, UpstreamReply,
};

/// Gateway replaying one token reply and one quote reply.
#[derive(Clone)]
struct CannedGateway {
    token: UpstreamReply,
    quote: UpstreamReply,
    calls: Arc<AtomicUsize>,
    seen_pdno: Arc<Mutex<Vec<String>>>,
}

impl CannedGateway {
    fn new(token: UpstreamReply, quote: UpstreamReply) -> Self {
        Self {
            token,
            quote,
            calls: Arc::new(AtomicUsize::new(0)),
            seen_pdno: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn with_price(price: &str) -> Self {
        Self::new(token_reply(), quote_reply(price))
    }
}

#[async_trait]
impl BrokerageGateway for CannedGateway {
    async fn request_token(&self, _: &Credentials) -> Result<UpstreamReply, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.token.clone())
    }

    async fn request_quote(
        &self,
        _: &Credentials,
        _: &AccessToken,
        query: &QuoteQuery,
    ) -> Result<UpstreamReply, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_pdno
            .lock()
            .unwrap()
            .push(query.selector.pdno.clone());
        Ok(self.quote.clone())
    }
}

/// Gateway that blows up mid-request.
struct PanickingGateway;

#[async_trait]
impl BrokerageGateway for PanickingGateway {
    async fn request_token(&self, _: &Credentials) -> Result<UpstreamReply, GatewayError> {
        panic!("token endpoint exploded");
    }

    async fn request_quote(
        &self,
        _: &Credentials,
        _: &AccessToken,
        _: &QuoteQuery,
    ) -> Result<UpstreamReply, GatewayError> {
        unreachable!()
    }
}

fn token_reply() -> UpstreamReply {
    UpstreamReply::new(200, r#"{"access_token":"tok","token_type":"Bearer"}"#)
}

fn quote_payload(price: &str) -> Value {
    json!({ "rt_cd": "0", "msg1": "ok", "output": { "stck_prpr": price } })
}

fn quote_reply(price: &str) -> UpstreamReply {
    UpstreamReply::new(200, quote_payload(price).to_string())
}

fn settings() -> QuoteSettings {
    QuoteSettings::with_credentials(Credentials::from_parts(Some("key"), Some("secret")).unwrap())
}

fn app<G: BrokerageGateway>(gateway: G, settings: QuoteSettings) -> axum::Router {
    HttpServer::new(QuoteService::new(gateway, settings)).router()
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: axum::Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_success_shape() {
    let (status, body) = send(
        app(CannedGateway::with_price("350,000"), settings()),
        request(Method::GET, "/api/kis-goldprice"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["pdno"], json!("KR7064580005"));
    assert_eq!(body["priceKRWPerGram"].as_f64(), Some(350_000.0));
    let per_oz = body["priceKRWPerOz"].as_f64().unwrap();
    assert!((per_oz - 10_886_216.88).abs() < 1e-6);
    assert_eq!(body["raw"], quote_payload("350,000"));
    assert!(body.get("msg").is_none());
}

#[tokio::test]
async fn test_closed_market_shape() {
    let (status, body) = send(
        app(CannedGateway::with_price("0"), settings()),
        request(Method::GET, "/api/kis-goldprice"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["msg"], json!(MARKET_CLOSED_MSG));
    assert_eq!(body["priceKRWPerGram"].as_f64(), Some(0.0));
    assert_eq!(body["priceKRWPerOz"].as_f64(), Some(0.0));
    assert!(body.get("raw").is_none());
}

#[tokio::test]
async fn test_missing_credentials_is_400_without_calls() {
    let gateway = CannedGateway::with_price("350,000");
    let calls = gateway.calls.clone();

    let (status, body) = send(
        app(gateway, QuoteSettings::default()),
        request(Method::GET, "/api/kis-goldprice"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("KIS_APP_KEY"));
    assert!(body.get("detail").is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_pdno_override_forwarded() {
    let gateway = CannedGateway::with_price("100");
    let seen = gateway.seen_pdno.clone();

    let (status, body) = send(
        app(gateway, settings()),
        request(Method::GET, "/api/kis-goldprice?pdno=M04020000"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pdno"], json!("M04020000"));
    assert_eq!(*seen.lock().unwrap(), vec!["M04020000".to_string()]);
}

#[tokio::test]
async fn test_blank_pdno_override_is_400() {
    let gateway = CannedGateway::with_price("100");
    let calls = gateway.calls.clone();

    let (status, body) = send(
        app(gateway, settings()),
        request(Method::GET, "/api/kis-goldprice?pdno="),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("pdno"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_any_method_accepted() {
    for method in [Method::POST, Method::PUT, Method::DELETE] {
        let (status, body) = send(
            app(CannedGateway::with_price("1,000"), settings()),
            request(method.clone(), GOLD_PRICE_PATH),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "method {method}");
        assert_eq!(body["priceKRWPerGram"].as_f64(), Some(1_000.0));
    }
}

#[tokio::test]
async fn test_token_not_json_is_500_with_raw_text() {
    let gateway = CannedGateway::new(
        UpstreamReply::new(200, "upstream maintenance"),
        quote_reply("1"),
    );

    let (status, body) = send(
        app(gateway, settings()),
        request(Method::GET, "/api/kis-goldprice"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().is_some());
    assert_eq!(body["detail"], json!("upstream maintenance"));
}

#[tokio::test]
async fn test_token_without_access_token_is_500() {
    let token_body = json!({ "error_code": "EGW00133" });
    let gateway = CannedGateway::new(
        UpstreamReply::new(200, token_body.to_string()),
        quote_reply("1"),
    );

    let (status, body) = send(
        app(gateway, settings()),
        request(Method::GET, "/api/kis-goldprice"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], token_body);
}

#[tokio::test]
async fn test_missing_output_is_500_with_payload() {
    let quote_body = json!({ "rt_cd": "0", "msg1": "ok" });
    let gateway = CannedGateway::new(
        token_reply(),
        UpstreamReply::new(200, quote_body.to_string()),
    );

    let (status, body) = send(
        app(gateway, settings()),
        request(Method::GET, "/api/kis-goldprice"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], quote_body);
}

#[tokio::test]
async fn test_non_numeric_price_is_500_with_value() {
    let (status, body) = send(
        app(CannedGateway::with_price("--"), settings()),
        request(Method::GET, "/api/kis-goldprice"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], json!("--"));
}

#[tokio::test]
async fn test_panic_is_caught_as_500() {
    let (status, body) = send(
        app(PanickingGateway, settings()),
        request(Method::GET, "/api/kis-goldprice"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("token endpoint exploded"));
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(
        app(CannedGateway::with_price("1"), settings()),
        request(Method::GET, "/health"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (status, body) = send(
        app(CannedGateway::with_price("1"), settings()),
        request(Method::GET, "/api-docs/openapi.json"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let item = &body["paths"][GOLD_PRICE_PATH];
    for method in ["get", "post", "put", "delete", "patch"] {
        assert!(item.get(method).is_some(), "{method} not documented");
    }
}
