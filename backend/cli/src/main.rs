use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use clap::{Parser, Subcommand};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

use firlens_config::Settings;
use firlens_extract::{FirExtractor, LlamaCloudClient};
use firlens_gateway::{build_router, start_server, GatewayState};

#[derive(Parser)]
#[command(name = "firlens")]
#[command(about = "FIRLens — FIR document extraction backend")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show whether a running instance responds
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env();
    logging::init_logger(settings.log_dir.as_deref().map(Path::new), &settings.log_level);

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve { port } => {
            let settings = Settings {
                port: port.unwrap_or(settings.port),
                ..settings
            };
            run_server(settings).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/", settings.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("FIRLens is not running on port {}", settings.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(settings: Settings) -> Result<()> {
    info!(
        port = settings.port,
        bind = %settings.bind_address,
        agent = %settings.agent_name,
        upload_dir = %settings.upload_dir,
        "Starting FIRLens gateway"
    );

    let api_key = settings
        .llama_cloud_api_key
        .clone()
        .context("LLAMA_CLOUD_API_KEY is not set")?;

    let client =
        LlamaCloudClient::new(api_key).with_base_url(settings.llama_cloud_base_url.clone());
    let extractor = FirExtractor::new(Arc::new(client), settings.agent_name.clone());

    let state = Arc::new(GatewayState::new(
        Arc::new(extractor),
        settings.upload_dir.clone(),
    ));

    let app = build_router(state).layer(cors_layer(&settings)?);

    let addr: SocketAddr = format!("{}:{}", settings.bind_address, settings.port)
        .parse()
        .context("invalid bind address")?;
    start_server(addr, app).await
}

/// Cross-origin access is restricted to the configured allow-list.
fn cors_layer(settings: &Settings) -> Result<CorsLayer> {
    let origins = settings
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin: {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true))
}
