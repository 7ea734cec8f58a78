//! Error types for the Tallyroom client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The WebSocket handshake failed
    #[error("Connection error: {0}")]
    ConnectFailed(String),

    /// An established connection was lost
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// An outgoing action could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Every reconnection attempt failed
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),
}
