//! Billfold command-line interface.

use anyhow::Result;
use billfold::api::BillResponse;
use billfold::{BillfoldConfig, ExtractionPipeline, GroqClient, TesseractOcr};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "billfold", version, about = "Bill line-item extraction pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract line items from a bill URL and print the result as JSON
    Extract {
        /// URL of the bill document (image or PDF)
        url: String,
    },
    /// Run the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
}

fn build_collaborators(
    config: &BillfoldConfig,
) -> Result<(Arc<TesseractOcr>, Arc<GroqClient>)> {
    let ocr = Arc::new(TesseractOcr::from_config(&config.ocr));
    let llm = Arc::new(GroqClient::from_env(
        config.llm.base_url.as_deref(),
        &config.llm.model,
    )?);
    Ok((ocr, llm))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = BillfoldConfig::default();

    match cli.command {
        Commands::Extract { url } => {
            let (ocr, llm) = build_collaborators(&config)?;
            let pipeline = ExtractionPipeline::new(ocr, llm, config);

            let report = pipeline.process_url(&url).await;
            let response = BillResponse::from(report);
            println!("{}", serde_json::to_string_pretty(&response)?);

            if !response.is_success {
                std::process::exit(1);
            }
        }
        Commands::Serve { host, port } => {
            let (ocr, llm) = build_collaborators(&config)?;
            billfold::api::serve(&host, port, ocr, llm, config).await?;
        }
    }

    Ok(())
}
