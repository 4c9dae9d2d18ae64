//! stmtgrid main entry point

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use stmtgrid_api::{start_server, AppState};
use stmtgrid_config::Config;
use stmtgrid_extract::HttpExtractor;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "stmtgrid")]
#[command(version = "0.1.0")]
#[command(about = "Upload bank statements, review the extracted transactions, export CSV", long_about = None)]
struct Args {
    /// Configuration file path (defaults are used when it does not exist)
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Extraction service base URL, overriding the config file
    #[arg(long)]
    endpoint: Option<String>,

    /// Port to listen on, overriding the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let rt = Runtime::new()?;
    rt.block_on(run(args))
}

async fn run(args: Args) -> anyhow::Result<()> {
    let (mut config, from_file) = match Config::load_or_default(&args.config).await {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", e.to_details());
            return Err(e).with_context(|| format!("Failed to load configuration from {}", args.config.display()));
        }
    };

    if let Some(endpoint) = args.endpoint {
        config.extractor.endpoint = endpoint;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Err(e) = config.validate() {
        eprintln!("{}", e.to_details());
        return Err(e).context("Invalid configuration");
    }

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    if from_file {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!("Config file not found: {}, using defaults", args.config.display());
    }

    let timeout = config.extractor.timeout_secs.map(Duration::from_secs);
    let extractor = HttpExtractor::new(&config.extractor.endpoint, timeout)
        .context("Failed to build the extraction client")?;
    log::info!("Extraction service: {}", extractor.upload_url());

    let state = AppState::new(config, Arc::new(extractor));
    start_server(state).await
}
