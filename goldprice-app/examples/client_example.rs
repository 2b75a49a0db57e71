//! Client example demonstrating the proxy flow against a running server.
//!
//! The brokerage is replaced by an in-process stub so no KIS credentials are
//! needed.
//!
//! Run with: cargo run -p goldprice-app --example client_example

use std::net::SocketAddr;

use async_trait::async_trait;
use goldprice_client::{ClientError, GoldPriceClient};
use goldprice_hex::{QuoteService, QuoteSettings, inbound::HttpServer};
use goldprice_types::{
    AccessToken, BrokerageGateway, Credentials, GatewayError, QuoteQuery, UpstreamReply,
};
use serde_json::json;
use tokio::net::TcpListener;

/// Stub brokerage: gold trades at 151,230 KRW/g, everything else is closed.
struct StubBrokerage;

#[async_trait]
impl BrokerageGateway for StubBrokerage {
    async fn request_token(&self, _: &Credentials) -> Result<UpstreamReply, GatewayError> {
        Ok(UpstreamReply::new(
            200,
            json!({ "access_token": "demo-token", "token_type": "Bearer" }).to_string(),
        ))
    }

    async fn request_quote(
        &self,
        _: &Credentials,
        _: &AccessToken,
        query: &QuoteQuery,
    ) -> Result<UpstreamReply, GatewayError> {
        let price = if query.selector.pdno == "KR7064580005" {
            "151,230"
        } else {
            "0"
        };
        Ok(UpstreamReply::new(
            200,
            json!({ "rt_cd": "0", "msg1": "ok", "output": { "stck_prpr": price } }).to_string(),
        ))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    println!("🚀 Starting server on port {port}...");

    let credentials = Credentials::from_parts(Some("demo-key"), Some("demo-secret"))
        .ok_or_else(|| anyhow::anyhow!("demo credentials rejected"))?;
    let service = QuoteService::new(StubBrokerage, QuoteSettings::with_credentials(credentials));
    let router = HttpServer::new(service).router();

    let server_addr = format!("127.0.0.1:{port}");
    tokio::spawn(async move {
        axum::serve(
            TcpListener::bind(&server_addr).await.unwrap(),
            router.into_make_service(),
        )
        .await
        .unwrap();
    });

    // Wait for server to start
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;

    let client = GoldPriceClient::new(format!("http://127.0.0.1:{port}"));

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    let quote = client.gold_price(None).await?;
    println!(
        "✅ {}: {:.0} KRW/g = {:.2} KRW/troy oz",
        quote.pdno, quote.price_krw_per_gram, quote.price_krw_per_oz
    );

    let closed = client.gold_price(Some("M04020000")).await?;
    println!(
        "✅ {}: {}",
        closed.pdno,
        closed.msg.as_deref().unwrap_or_default()
    );

    match client.gold_price(Some("")).await {
        Err(ClientError::Api {
            status, message, ..
        }) => println!("✅ Blank instrument rejected ({status}): {message}"),
        other => anyhow::bail!("expected a 400, got {other:?}"),
    }

    println!("\n🎉 Example completed successfully!");
    Ok(())
}
