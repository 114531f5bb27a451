//! ifinv CLI
//!
//! Runs the interface inventory HTTP service and converts seed data.
//!
//! # Commands
//!
//! - `serve` - Load a JSON seed and serve the HTTP API
//! - `import-csv` - Convert a switch CSV export into a JSON seed
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Interface inventory service.
#[derive(Parser)]
#[command(name = "ifinv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,

        /// JSON seed file loaded at startup
        #[arg(short, long)]
        seed: Option<PathBuf>,

        /// Accepted username
        #[arg(long, default_value = "user")]
        username: String,

        /// Accepted password
        #[arg(long, default_value = "password")]
        password: String,

        /// Token signing secret (random per process if omitted)
        #[arg(long)]
        jwt_secret: Option<String>,

        /// Bearer token lifetime in seconds
        #[arg(long, default_value_t = 24 * 60 * 60)]
        token_expiry_secs: u64,

        /// Compare vlanId/speedMbps numerically when sorting
        #[arg(long)]
        numeric_sort: bool,
    },

    /// Convert a CSV export into a JSON seed file
    ImportCsv {
        /// CSV input
        input: PathBuf,

        /// JSON output
        output: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Serve {
            bind,
            seed,
            username,
            password,
            jwt_secret,
            token_expiry_secs,
            numeric_sort,
        } => {
            let options = commands::serve::ServeOptions {
                bind,
                seed,
                username,
                password,
                jwt_secret,
                token_expiry_secs,
                numeric_sort,
            };
            commands::serve::run(options)?;
        }
        Commands::ImportCsv { input, output } => {
            commands::import_csv::run(&input, &output)?;
        }
        Commands::Version => {
            println!("ifinv CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("ifinv core v{}", ifinv_core::VERSION);
        }
    }

    Ok(())
}
