//! Tallyroom shared-state broadcast server.
//!
//! Holds one shared selection state and broadcasts it to every connected
//! participant after each accepted action.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tallyroom-server
//! cargo run --bin tallyroom-server -- --host 0.0.0.0 --port 8765 --enforce-lock
//! ```

use std::sync::Arc;

use clap::Parser;

use tallyroom_server::{
    domain::ActionPolicy,
    infrastructure::{dto::JsonSnapshotEncoder, message_pusher::WebSocketMessagePusher},
    ui::Server,
    usecase::{HubHandle, SessionHub},
};
use tallyroom_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "tallyroom-server")]
#[command(about = "Shared-state broadcast server for live A/B selection", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8765")]
    port: u16,

    /// Reject `select` while the selection is locked (by default the server trusts clients)
    #[arg(long)]
    enforce_lock: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. MessagePusher
    // 2. SessionHub (state store + registry), moved into its own task
    // 3. Server
    let policy = ActionPolicy {
        enforce_lock: args.enforce_lock,
    };
    tracing::info!("Lock enforcement: {}", policy.enforce_lock);

    let message_pusher = WebSocketMessagePusher::new();
    let hub = SessionHub::new(
        message_pusher,
        Arc::new(JsonSnapshotEncoder),
        Arc::new(SystemClock),
        policy,
    );
    let gateway = Arc::new(HubHandle::spawn(hub));

    let server = Server::new(gateway);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
