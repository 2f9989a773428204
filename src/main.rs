mod cli;
mod server;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use rucsearch_client::ocr::TesseractReader;
use rucsearch_client::SunatClient;
use rucsearch_core::AppConfig;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config_str = std::fs::read_to_string(&cli.config).unwrap_or_else(|_| {
        warn!(path = %cli.config, "config file not found, using defaults");
        include_str!("../config/default.toml").to_string()
    });
    let config: AppConfig = toml::from_str(&config_str)?;

    let reader = TesseractReader::new(&config.ocr.tesseract_bin);
    if !reader.available().await {
        warn!(binary = %config.ocr.tesseract_bin, "ocr binary not found, captcha solving will fail");
    }

    let client = SunatClient::new(config.registry.clone(), Arc::new(reader));

    match cli.command {
        Commands::Search { query } => {
            let results = client.search(&query).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Detail { ruc } => {
            let detail = client.detail(&ruc).await?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Commands::Serve { address } => {
            let address = address.unwrap_or_else(|| config.server.listen_address.clone());
            server::run(client, &address).await?;
        }
    }

    Ok(())
}
