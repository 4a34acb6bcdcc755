//! Storefront config server
//!
//! Resolves the storefront's live configuration, runs the dependent
//! subsystems and serves the admin API for the config manager screen.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::{ConfigLoader, Overrides};
use server::{build_router, run_server};
use shutdown::spawn_config_reload_handler;
use state::{AppState, Subsystems};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use storefront_core::config::{
    ConfigFetcher, ConfigService, FileStorage, HttpConfigFetcher, NoRemoteConfig,
};
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Storefront config server - settings resolver and admin API
#[derive(Parser, Debug)]
#[command(name = "storefront-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./storefront.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Apply production build policy regardless of the file
    #[arg(long, default_value = "false")]
    production: bool,

    /// Override the remote unified config base URL
    #[arg(long, env = "STOREFRONT_REMOTE_BASE_URL")]
    remote_base_url: Option<Url>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    tracing::info!("Starting storefront-server v{}", env!("CARGO_PKG_VERSION"));

    let config_loader = Arc::new(ConfigLoader::new(
        &args.config,
        Overrides {
            listen: args.listen,
            production: args.production,
            remote_base_url: args.remote_base_url,
        },
    ));
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!("Configuration loaded from {:?}", args.config);

    let fetcher: Arc<dyn ConfigFetcher> = match &loaded_config.remote.base_url {
        Some(base_url) => {
            tracing::info!(%base_url, path = %loaded_config.remote.path, "Remote config enabled");
            Arc::new(HttpConfigFetcher::new(base_url.clone()))
        }
        None => {
            tracing::info!("No remote config base URL, remote tier disabled");
            Arc::new(NoRemoteConfig)
        }
    };

    let subsystems = Subsystems::new();
    let service = ConfigService::builder(Arc::new(FileStorage::new(&loaded_config.storage.dir)))
        .storage_key(loaded_config.storage.key.clone())
        .fetcher(fetcher)
        .remote_path(loaded_config.remote.path.clone())
        .persist_on_load(loaded_config.remote.persist_on_load)
        .policy(loaded_config.policy)
        .theme_listener(subsystems.theme.clone())
        .build();

    let (subsystem_shutdown_tx, subsystem_shutdown_rx) = watch::channel(false);
    let subsystem_handles = subsystems.spawn(&service, subsystem_shutdown_rx);

    service.initialize().await;
    tracing::info!(state = ?service.state(), "Config resolved");

    let listen_addr = loaded_config.listen;
    let state = AppState::new(service, subsystems, loaded_config.admin);

    // Spawn config reload handler (listens for SIGHUP)
    let shutdown_notify = spawn_config_reload_handler(state.clone(), config_loader);

    let router = build_router(state);

    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    shutdown_notify.notify_one();
    let _ = subsystem_shutdown_tx.send(true);
    for handle in subsystem_handles {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "Subsystem task failed");
        }
    }
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront_core=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
