// Carbon Calculator - Web Server
// REST API with Axum

use anyhow::{Context, Result};
use carbon_calculator::api::{router, AppState};
use carbon_calculator::{logging, AppConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Carbon Calculator HTTP server
#[derive(Parser)]
#[command(name = "carbon-server")]
#[command(version)]
#[command(about = "Serve the carbon calculator as a JSON API and web page")]
struct Args {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Factor table file (CSV or .json), overrides the config
    #[arg(long)]
    factors: Option<PathBuf>,

    /// Default country, overrides the config
    #[arg(long)]
    country: Option<String>,

    /// Listen address, overrides the config
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    println!("🌐 Carbon Calculator - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = AppConfig::load_or_default(args.config.as_deref())?
        .with_overrides(args.factors, args.country, args.bind);
    let table = config.factor_table()?;
    println!("✓ Factor table loaded: {} countries", table.len());

    let app = router(AppState::new(table, config.default_country.clone()));

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "listening");

    println!("\n🚀 Server running on http://{}", config.bind_addr);
    println!("   API: http://{}/api/countries", config.bind_addr);
    println!("   UI:  http://{}", config.bind_addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
