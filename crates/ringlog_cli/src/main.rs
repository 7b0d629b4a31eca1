//! Ringlog CLI
//!
//! Command-line tools for the ringlog record store.
//!
//! # Commands
//!
//! - `serve` - Run the TCP log server
//! - `send` - Send one line to a server and print the replayed store
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Ringlog command-line tools.
#[derive(Parser)]
#[command(name = "ringlog")]
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
    /// Run the TCP log server
    Serve {
        /// Address to bind to
        #[arg(short, long, default_value = "0.0.0.0:9000")]
        bind: SocketAddr,

        /// Number of record slots in the store
        #[arg(short, long, default_value_t = ringlog_core::DEFAULT_CAPACITY)]
        capacity: usize,

        /// Seconds between timestamp records (0 disables them)
        #[arg(short, long, default_value_t = 10)]
        timestamp_interval: u64,

        /// Seconds to wait for sessions on shutdown
        #[arg(short, long, default_value_t = 3)]
        grace: u64,
    },

    /// Send one line to a server and print the replayed store content
    Send {
        /// Server address to connect to
        #[arg(short, long, default_value = "127.0.0.1:9000")]
        addr: SocketAddr,

        /// The line to write (a trailing newline is added if missing)
        line: String,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Serve {
            bind,
            capacity,
            timestamp_interval,
            grace,
        } => commands::serve::run(bind, capacity, timestamp_interval, grace).await?,
        Commands::Send { addr, line } => commands::send::run(addr, &line).await?,
        Commands::Version => {
            println!("ringlog CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("ringlog core v{}", ringlog_core::VERSION);
        }
    }

    Ok(())
}
