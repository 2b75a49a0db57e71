//! Client tests against a mocked proxy.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use goldprice_client::{ClientError, GOLD_PRICE_PATH, GoldPriceClient};

#[tokio::test]
async fn test_gold_price_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GOLD_PRICE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "pdno": "KR7064580005",
            "priceKRWPerGram": 350000.0,
            "priceKRWPerOz": 10886216.88,
            "raw": { "output": { "stck_prpr": "350,000" } }
        })))
        .mount(&server)
        .await;

    let client = GoldPriceClient::new(server.uri());
    let quote = client.gold_price(None).await.unwrap();

    assert!(quote.ok);
    assert_eq!(quote.price_krw_per_gram, 350_000.0);
    assert!(!quote.is_closed());
}

#[tokio::test]
async fn test_gold_price_sends_override() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GOLD_PRICE_PATH))
        .and(query_param("pdno", "M04020000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "pdno": "M04020000",
            "priceKRWPerGram": 0.0,
            "priceKRWPerOz": 0.0,
            "msg": "closed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GoldPriceClient::new(format!("{}/", server.uri()));
    let quote = client.gold_price(Some("M04020000")).await.unwrap();

    assert!(quote.is_closed());
    assert_eq!(quote.msg.as_deref(), Some("closed"));
}

#[tokio::test]
async fn test_error_body_decoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GOLD_PRICE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "KIS quote response missing output",
            "detail": { "rt_cd": "0" }
        })))
        .mount(&server)
        .await;

    let client = GoldPriceClient::new(server.uri());

    match client.gold_price(None).await {
        Err(ClientError::Api {
            status,
            message,
            detail,
        }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "KIS quote response missing output");
            assert_eq!(detail, Some(json!({ "rt_cd": "0" })));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
        .mount(&server)
        .await;

    assert!(GoldPriceClient::new(server.uri()).health().await.unwrap());
}
