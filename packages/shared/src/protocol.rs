//! Wire format exchanged over the WebSocket connection.
//!
//! ## Upstream (participant → server)
//!
//! ```text
//! { "action": "hello" | "select" | "done" | "lock" | "reset", "payload": <action-specific> }
//! ```
//!
//! ## Downstream (server → participant)
//!
//! ```text
//! { "locked": bool, "selectedOption": "A"|"B"|null, "doneBy": [..], "lastAction": ..|null, "lastBy": ..|null }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const ACTION_HELLO: &str = "hello";
pub const ACTION_SELECT: &str = "select";
pub const ACTION_DONE: &str = "done";
pub const ACTION_LOCK: &str = "lock";
pub const ACTION_RESET: &str = "reset";

/// Upstream message envelope.
///
/// `payload` is kept as raw JSON; its shape depends on `action` and is
/// validated by the server when the envelope is decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEnvelope {
    pub action: String,
    #[serde(default)]
    pub payload: Value,
}

impl ActionEnvelope {
    pub fn new(action: impl Into<String>, payload: Value) -> Self {
        Self {
            action: action.into(),
            payload,
        }
    }

    /// `{"action":"hello","payload":{"name":..}}`
    pub fn hello(name: &str) -> Self {
        Self::new(ACTION_HELLO, json!({ "name": name }))
    }

    /// `{"action":"select","payload":"A"}`
    pub fn select(option: &str) -> Self {
        Self::new(ACTION_SELECT, Value::String(option.to_string()))
    }

    /// `{"action":"done","payload":<name>}`
    pub fn done(name: &str) -> Self {
        Self::new(ACTION_DONE, Value::String(name.to_string()))
    }

    pub fn lock() -> Self {
        Self::new(ACTION_LOCK, Value::Null)
    }

    pub fn reset() -> Self {
        Self::new(ACTION_RESET, Value::Null)
    }
}

/// Downstream snapshot of the shared state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedStateDto {
    pub locked: bool,
    pub selected_option: Option<String>,
    pub done_by: Vec<String>,
    pub last_action: Option<String>,
    pub last_by: Option<String>,
}
