//! hub タスク
//!
//! `SessionHub` を単一の tokio タスクに移し、コマンドを到着順に 1 つずつ処理します。
//! Store と Registry はこのタスクだけが所有するため、ロックを使わずに
//! 「変更 → ブロードキャスト」が他のイベントと重ならないことが保証されます。

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::domain::{Action, ConnectionId, MessagePusher, Participant, PusherChannel, SharedState};

use super::{error::GatewayError, gateway::SessionGateway, session_hub::SessionHub};

/// hub タスクへのコマンド
#[derive(Debug)]
pub enum HubCommand {
    Connect {
        sender: PusherChannel,
        reply: oneshot::Sender<ConnectionId>,
    },
    Submit {
        id: ConnectionId,
        action: Action,
    },
    Disconnect {
        id: ConnectionId,
    },
    Snapshot {
        reply: oneshot::Sender<SharedState>,
    },
    Participants {
        reply: oneshot::Sender<Vec<Participant>>,
    },
}

/// hub タスクへのハンドル
///
/// 全てのハンドルが drop されると hub タスクは終了する。
#[derive(Debug, Clone)]
pub struct HubHandle {
    commands: mpsc::UnboundedSender<HubCommand>,
}

impl HubHandle {
    /// hub タスクを起動
    pub fn spawn<P>(hub: SessionHub<P>) -> Self
    where
        P: MessagePusher + 'static,
    {
        let (commands, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(hub, rx));
        Self { commands }
    }

    fn send(&self, command: HubCommand) -> Result<(), GatewayError> {
        self.commands
            .send(command)
            .map_err(|_| GatewayError::HubUnavailable)
    }
}

async fn run<P: MessagePusher>(
    mut hub: SessionHub<P>,
    mut commands: mpsc::UnboundedReceiver<HubCommand>,
) {
    tracing::debug!("Session hub started");

    while let Some(command) = commands.recv().await {
        dispatch(&mut hub, command);
    }

    tracing::debug!("Session hub stopped");
}

fn dispatch<P: MessagePusher>(hub: &mut SessionHub<P>, command: HubCommand) {
    // 応答の送信失敗は要求側がすでにいなくなったことを意味するだけなので無視する
    match command {
        HubCommand::Connect { sender, reply } => {
            let id = hub.on_connect(sender);
            let _ = reply.send(id);
        }
        HubCommand::Submit { id, action } => {
            let action_name = action.name().to_string();
            let outcome = hub.on_message(id, action);
            tracing::trace!("Processed '{}' from '{}': {:?}", action_name, id, outcome);
        }
        HubCommand::Disconnect { id } => {
            hub.on_disconnect(&id);
        }
        HubCommand::Snapshot { reply } => {
            let _ = reply.send(hub.snapshot());
        }
        HubCommand::Participants { reply } => {
            let _ = reply.send(hub.participants());
        }
    }
}

#[async_trait]
impl SessionGateway for HubHandle {
    async fn connect(&self, sender: PusherChannel) -> Result<ConnectionId, GatewayError> {
        let (reply, rx) = oneshot::channel();
        self.send(HubCommand::Connect { sender, reply })?;
        rx.await.map_err(|_| GatewayError::HubUnavailable)
    }

    fn submit(&self, id: ConnectionId, action: Action) -> Result<(), GatewayError> {
        self.send(HubCommand::Submit { id, action })
    }

    fn disconnect(&self, id: ConnectionId) -> Result<(), GatewayError> {
        self.send(HubCommand::Disconnect { id })
    }

    async fn snapshot(&self) -> Result<SharedState, GatewayError> {
        let (reply, rx) = oneshot::channel();
        self.send(HubCommand::Snapshot { reply })?;
        rx.await.map_err(|_| GatewayError::HubUnavailable)
    }

    async fn participants(&self) -> Result<Vec<Participant>, GatewayError> {
        let (reply, rx) = oneshot::channel();
        self.send(HubCommand::Participants { reply })?;
        rx.await.map_err(|_| GatewayError::HubUnavailable)
    }
}
