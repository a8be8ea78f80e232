use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use backend_bootstrap::{init_logging, reseed, run_remote, run_standalone, RemoteCommand};
use backend_infrastructure::{config_path, AppConfig};

#[derive(Parser, Debug)]
#[command(name = "court-backend")]
#[command(about = "Volleyball event collection server", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Replace the stored collection with the seed set on startup
    #[arg(long)]
    reset: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Reseed the local collection and exit
    Seed,
    /// Query a running server
    Remote {
        /// API root of the server
        #[arg(long, default_value = "http://127.0.0.1:3000/api")]
        url: String,
        #[command(subcommand)]
        command: RemoteCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref()).await?;
    if args.reset {
        config.force_reset = true;
    }

    let _log_guard = init_logging(&config)?;
    match &config.loaded_from {
        Some(file) => info!("loaded config from {}", file.display()),
        None => warn!(
            "config file {} not found, using defaults",
            config_path(args.config.as_deref()).display()
        ),
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => run_standalone(config).await,
        Command::Seed => {
            let count = reseed(&config).await?;
            info!(count, "collection reseeded");
            Ok(())
        }
        Command::Remote { url, command } => {
            let timeout = Duration::from_secs(config.request_timeout_seconds);
            let output = run_remote(&url, timeout, command).await?;
            println!("{}", output);
            Ok(())
        }
    }
}
