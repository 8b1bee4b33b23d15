use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Venue directory CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "venue-directory",
    version,
    about = "Read-only HTTP API over a venue directory loaded from CSV"
)]
pub struct Cli {
    /// Path to the venues CSV file
    #[arg(long)]
    pub csv_path: Option<PathBuf>,

    /// Socket address to listen on (e.g. 127.0.0.1:8000)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}
