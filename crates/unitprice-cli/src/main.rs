mod parse;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "unitprice-cli")]
#[command(about = "Extract unit-pricing data from retailer product pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a product page through the relays and print what was found
    Parse {
        /// Product page URL
        url: String,
        /// Print the raw outcome as JSON instead of a summary
        #[arg(long)]
        json: bool,
        /// Parse HTML from this file instead of fetching `url`
        #[arg(long, value_name = "PATH")]
        html_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = unitprice_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Parse {
            url,
            json,
            html_file,
        } => parse::run_parse(&config, &url, html_file.as_deref(), json).await,
    }
}
