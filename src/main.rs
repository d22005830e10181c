use anyhow::Result;
use clap::Parser;
use gemini_image_studio::ai::GeminiGenerationClient;
use gemini_image_studio::image::ImageProcessor;
use gemini_image_studio::models::Config;
use gemini_image_studio::server::{self, AppState};
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "gemini-image-studio")]
#[command(about = "Web UI for Gemini image generation and analysis")]
struct CliArgs {
    /// Address to bind. Use 0.0.0.0 to expose the UI on the local network.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = 7860)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_image_studio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!("Using model: {}", config.model);

    let output_dir = PathBuf::from("output").join(format!(
        "{}_{}",
        chrono::Local::now().format("%Y-%m-%d"),
        uuid::Uuid::new_v4()
    ));

    let images = match ImageProcessor::new(&output_dir) {
        Ok(images) => images,
        Err(e) => {
            error!("Failed to create output directory: {}", e);
            std::process::exit(1);
        }
    };
    info!("Saving generated images under {}", output_dir.display());

    let state = Arc::new(AppState {
        generator: Box::new(GeminiGenerationClient::new(
            config.gemini_api_key.clone(),
            config.model.clone(),
        )),
        images: Box::new(images),
        image_dir: output_dir,
    });

    let listener = tokio::net::TcpListener::bind((args.host, args.port)).await?;
    info!("Launching web interface at http://{}:{}", args.host, args.port);

    if let Err(e) = server::serve(listener, state).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
