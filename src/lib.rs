//! Search an external recipe catalog and keep a personal favorites list.
//!
//! The crate wires three small pieces together:
//!
//! - [`normalize`]: maps heterogeneous provider records into the canonical
//!   [`Recipe`] shape
//! - [`catalog`]: proxies search and random-pick requests to a
//!   TheMealDB-compatible HTTP API
//! - [`store`]: a single-table SQLite collection of saved [`Favorite`]s
//!
//! [`start_server`] exposes them over a JSON HTTP API together with an
//! embedded single-page frontend.

use log::info;
use tokio::net::TcpListener;
use tokio::signal;

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod routes;
pub mod state;
pub mod store;

pub use catalog::CatalogClient;
pub use config::ServerConfig;
pub use error::{ApiError, CatalogError, StoreError};
pub use model::{Favorite, Recipe};
pub use normalize::normalize_record;
pub use routes::router;
pub use state::AppState;
pub use store::FavoritesStore;

/// Open the favorites database, bind the listener and serve the API until
/// ctrl-c or SIGTERM.
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(&config)?;
    let app = routes::router(state);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("API on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutting down");
}
