use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wikiiif::application::{ServerConfig, serve};
use wikiiif::infrastructure::commons::COMMONS_API_URL;

#[derive(Parser)]
#[command(
    name = "wikiiif",
    about = "Serve IIIF manifests and image services for Wikimedia Commons images"
)]
struct Cli {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "WIKIIIF_BIND_ADDRESS", default_value = "127.0.0.1:8000")]
    bind_address: SocketAddr,

    /// Externally visible base URL used in serialized identifiers.
    #[arg(
        long,
        env = "WIKIIIF_PUBLIC_BASE_URL",
        default_value = "http://localhost:8000"
    )]
    public_base_url: String,

    /// Wikimedia Commons query API endpoint.
    #[arg(long, env = "WIKIIIF_COMMONS_API_URL", default_value = COMMONS_API_URL)]
    commons_api_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before clap parses env vars)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    serve(ServerConfig {
        bind_address: cli.bind_address,
        public_base_url: cli.public_base_url,
        commons_api_url: cli.commons_api_url,
    })
    .await
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if logging cannot be initialized
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}
