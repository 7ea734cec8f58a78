//! Local mirror of the shared state.
//!
//! `reduce` is a pure function: `(state, action) -> new state`. The `Store`
//! wraps it in a `watch` channel so the renderer can subscribe to changes.

use serde::Serialize;
use tokio::sync::watch;

use tallyroom_shared::protocol::SharedStateDto;

/// Client-side state: the last snapshot plus the connection flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientState {
    pub locked: bool,
    pub selected_option: Option<String>,
    pub done_by: Vec<String>,
    pub connected: bool,
    pub last_action: Option<String>,
    pub last_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    ConnectionChanged { connected: bool },
    SnapshotReceived(SharedStateDto),
    ParticipantDone { name: String },
}

pub fn reduce(state: &ClientState, action: ClientAction) -> ClientState {
    match action {
        ClientAction::ConnectionChanged { connected } => ClientState {
            connected,
            ..state.clone()
        },
        ClientAction::SnapshotReceived(snapshot) => ClientState {
            locked: snapshot.locked,
            selected_option: snapshot.selected_option,
            done_by: snapshot.done_by,
            connected: state.connected,
            last_action: snapshot.last_action,
            last_by: snapshot.last_by,
        },
        ClientAction::ParticipantDone { name } => {
            let mut done_by = state.done_by.clone();
            done_by.push(name);
            ClientState {
                done_by,
                ..state.clone()
            }
        }
    }
}

/// Observable store around `reduce`
#[derive(Debug)]
pub struct Store {
    state: watch::Sender<ClientState>,
}

impl Store {
    pub fn new() -> Self {
        let (state, _rx) = watch::channel(ClientState::default());
        Self { state }
    }

    pub fn dispatch(&self, action: ClientAction) {
        self.state.send_modify(|state| *state = reduce(state, action));
    }

    pub fn state(&self) -> ClientState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every dispatch
    pub fn subscribe(&self) -> watch::Receiver<ClientState> {
        self.state.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
