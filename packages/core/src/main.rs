use clap::Parser;
use dotenvy::dotenv;
use tokio::net::TcpListener;

use venue_directory::api::create_router;
use venue_directory::cli::Cli;
use venue_directory::config::Config;
use venue_directory::loader::load_venues;
use venue_directory::logging::init_logging;
use venue_directory::store::VenueTable;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env()
        .map(|config| config.with_cli_overrides(cli))
        .unwrap_or_else(|err| {
            tracing::error!("Config error: {}", err);
            std::process::exit(1);
        });

    tracing::info!("Service starting with config: {:?}", config);

    let venues = load_venues(&config.csv_path).unwrap_or_else(|err| {
        tracing::error!("Failed to load {}: {}", config.csv_path.display(), err);
        std::process::exit(1);
    });
    let table = VenueTable::new(venues);
    tracing::info!(
        "Loaded {} venues from {}",
        table.len(),
        config.csv_path.display()
    );

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .unwrap_or_else(|err| {
            tracing::error!("Cannot bind {}: {}", config.bind_addr, err);
            std::process::exit(1);
        });
    tracing::info!("Listening on {}", config.bind_addr);

    if let Err(err) = axum::serve(listener, create_router(table))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", err);
        std::process::exit(1);
    }

    tracing::info!("Server stopped cleanly");
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        return;
    }
    tracing::info!("Shutdown signal received. Draining connections.");
}
