//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! hub タスクが排他的に所有するため、内部にロックは持ちません。

use std::collections::HashMap;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
#[derive(Debug, Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信チャンネル
    clients: HashMap<ConnectionId, PusherChannel>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録されている接続の数
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl MessagePusher for WebSocketMessagePusher {
    fn register_client(&mut self, id: ConnectionId, sender: PusherChannel) {
        self.clients.insert(id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", id);
    }

    fn unregister_client(&mut self, id: &ConnectionId) {
        self.clients.remove(id);
        tracing::debug!("Connection '{}' unregistered from MessagePusher", id);
    }

    fn push_to(&self, id: &ConnectionId, content: &str) -> Result<(), MessagePushError> {
        let sender = self
            .clients
            .get(id)
            .ok_or(MessagePushError::ClientNotFound(*id))?;

        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", id);
        Ok(())
    }

    fn broadcast(&self, targets: &[ConnectionId], content: &str) -> usize {
        let mut delivered = 0;

        for target in targets {
            match self.clients.get(target) {
                // 閉じた接続はスキップする（登録解除は切断イベントでのみ行う）
                Some(sender) => match sender.send(content.to_string()) {
                    Ok(()) => delivered += 1,
                    Err(_) => {
                        tracing::debug!("Connection '{}' is closed, skipping", target);
                    }
                },
                None => {
                    tracing::debug!(
                        "Connection '{}' not found during broadcast, skipping",
                        target
                    );
                }
            }
        }

        delivered
    }
}
