//! # Gold Price Proxy Application
//!
//! `goldprice-server`: reads the environment, builds the KIS gateway and the
//! quote service, and serves them over HTTP until Ctrl+C or SIGTERM.

mod config;

use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use goldprice_hex::{QuoteService, inbound::HttpServer};
use goldprice_kis::KisGateway;

use config::Config;

const DEFAULT_LOG_FILTER: &str = "info,goldprice_app=debug,goldprice_hex=debug";

/// Installs the OTLP span exporter and the global subscriber. The returned
/// provider must be shut down on exit so batched spans are exported.
fn init_telemetry() -> anyhow::Result<SdkTracerProvider> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;
    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();
    global::set_tracer_provider(provider.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_opentelemetry::layer().with_tracer(provider.tracer("goldprice-proxy")))
        .init();

    Ok(provider)
}

fn log_startup(config: &Config, gateway: &KisGateway) {
    tracing::info!(port = config.port, upstream = %gateway.base_url(), "Starting gold price proxy");
    tracing::debug!(
        pdno = %config.quote.default_pdno,
        market_division = %config.quote.market_division,
        tr_id = %config.quote.tr_id,
        timeout_secs = config.http_timeout.as_secs(),
        "Quote defaults"
    );
    if config.quote.credentials.is_none() {
        tracing::warn!("KIS_APP_KEY / KIS_APP_SECRET not set; quote requests will be rejected");
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let gateway = KisGateway::new(&config.kis_base_url, config.http_timeout)?;
    log_startup(&config, &gateway);

    let addr = format!("0.0.0.0:{}", config.port);
    HttpServer::new(QuoteService::new(gateway, config.quote))
        .run(&addr)
        .await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let provider = init_telemetry()?;

    let result = match Config::from_env() {
        Ok(config) => serve(config).await,
        Err(e) => Err(e),
    };
    if let Err(e) = &result {
        tracing::error!(error = %e, "Gold price proxy exited with an error");
    }

    if let Err(e) = provider.shutdown() {
        eprintln!("Failed to flush traces: {e}");
    }
    result
}
