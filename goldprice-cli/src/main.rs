//! Gold Price CLI
//!
//! Command-line interface for the gold price proxy.

use anyhow::Result;
use clap::{Parser, Subcommand};

use goldprice_client::{ClientError, GoldPriceClient};
use goldprice_types::GoldPriceResponse;

#[derive(Parser)]
#[command(name = "goldprice")]
#[command(author, version, about = "KIS gold price proxy CLI client", long_about = None)]
struct Cli {
    /// Base URL of the gold price proxy
    #[arg(
        long,
        env = "GOLDPRICE_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the current gold price
    Price {
        /// Instrument identifier overriding the server default
        #[arg(long)]
        pdno: Option<String>,
        /// Print the full JSON response
        #[arg(long)]
        json: bool,
    },
    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let client = GoldPriceClient::new(&cli.api_url);

    match cli.command {
        Commands::Price { pdno, json } => match client.gold_price(pdno.as_deref()).await {
            Ok(quote) if json => println!("{}", serde_json::to_string_pretty(&quote)?),
            Ok(quote) => print_quote(&quote),
            Err(ClientError::Api {
                status,
                message,
                detail,
            }) => {
                eprintln!("✗ {} (HTTP {})", message, status);
                if let Some(detail) = detail {
                    eprintln!("{}", serde_json::to_string_pretty(&detail)?);
                }
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Health => {
            if client.health().await? {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_quote(quote: &GoldPriceResponse) {
    println!("Instrument: {}", quote.pdno);
    if let Some(msg) = &quote.msg {
        println!("⚠️  {}", msg);
    }
    println!("KRW / g:     {:>16.2}", quote.price_krw_per_gram);
    println!("KRW / troy oz: {:>14.2}", quote.price_krw_per_oz);
}
