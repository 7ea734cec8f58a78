//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::SessionGateway;

use super::{
    handler::{get_participants, get_state, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Shared-state broadcast server
///
/// # Example
///
/// ```ignore
/// let gateway = Arc::new(HubHandle::spawn(hub));
/// let server = Server::new(gateway);
/// server.run("127.0.0.1".to_string(), 8765).await?;
/// ```
pub struct Server {
    /// SessionGateway（hub タスクへの窓口）
    gateway: Arc<dyn SessionGateway>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(gateway: Arc<dyn SessionGateway>) -> Self {
        Self { gateway }
    }

    /// Build the axum router
    ///
    /// The WebSocket endpoint is served on both `/` and `/ws`.
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            gateway: self.gateway.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/", get(websocket_handler))
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/state", get(get_state))
            .route("/api/participants", get(get_participants))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the server until a shutdown signal is received
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8765)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Tallyroom server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
