use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cli::Cli;

/// Origins allowed to make cross-origin requests.
pub const ALLOWED_ORIGINS: &[&str] = &[
    "https://freyartt.com",
    "https://www.freyartt.com",
    "http://localhost:5500",
    "http://127.0.0.1:5500",
    "http://localhost:8800",
    "http://127.0.0.1:8800",
];

pub const DEFAULT_CSV_PATH: &str = "venues.csv";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct Config {
    pub csv_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Read `VENUES_CSV` and `BIND_ADDR`, falling back to defaults when unset.
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(env::var("VENUES_CSV").ok(), env::var("BIND_ADDR").ok())
    }

    fn from_vars(csv_path: Option<String>, bind_addr: Option<String>) -> Result<Self, String> {
        let csv_path = PathBuf::from(csv_path.unwrap_or_else(|| DEFAULT_CSV_PATH.to_string()));

        let bind_addr = bind_addr.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|_| format!("Invalid BIND_ADDR: {}", bind_addr))?;

        Ok(Self {
            csv_path,
            bind_addr,
        })
    }

    /// Command-line flags take precedence over the environment.
    pub fn with_cli_overrides(mut self, cli: Cli) -> Self {
        if let Some(csv_path) = cli.csv_path {
            self.csv_path = csv_path;
        }
        if let Some(bind) = cli.bind {
            self.bind_addr = bind;
        }
        self
    }
}
