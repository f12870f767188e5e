//! Maintenance-gated demo server.
//!
//! Usage: `maintenance-server [config.toml]`
//!
//! Without a config file every setting takes its default: state is read from
//! the `FASTAPI_MAINTENANCE_MODE` environment variable and the admin API is
//! disabled.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use maintenance_mode::admin::{self, AdminState};
use maintenance_mode::config::{load_config, watcher::ConfigWatcher, MaintenanceConfig};
use maintenance_mode::http::server::apply_state_config;
use maintenance_mode::observability::{logging, metrics};
use maintenance_mode::{HttpServer, Shutdown, StateController};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => MaintenanceConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("maintenance-server v{} starting", env!("CARGO_PKG_VERSION"));

    let controller = Arc::new(StateController::new());
    apply_state_config(&controller, &config.state)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend = %config.state.backend,
        maintenance_mode = ?config.maintenance.maintenance_mode,
        admin_enabled = config.admin.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Hot reload; the watcher must stay alive for the lifetime of the server.
    let (_watcher, config_updates) = match &config_path {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let shutdown = Shutdown::new();
    let mut tasks = Vec::new();

    if config.admin.enabled {
        let listener = TcpListener::bind(&config.admin.bind_address).await?;
        let state = AdminState::new(controller.clone(), config.admin.api_key.as_str());
        tasks.push(tokio::spawn(admin::serve_admin(
            listener,
            state,
            shutdown.subscribe(),
        )));
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");
    let server = HttpServer::new(config, controller);
    tasks.push(tokio::spawn(server.run(
        listener,
        config_updates,
        shutdown.subscribe(),
    )));

    maintenance_mode::lifecycle::signals::shutdown_signal().await;
    let servers = shutdown.trigger();
    tracing::info!(servers, "Draining servers");

    for task in tasks {
        if let Err(e) = task.await? {
            tracing::error!(error = %e, "Server exited with error");
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
