//! UseCase: 接続・メッセージ・切断の処理
//!
//! `SessionHub` は State Store と Session Registry を所有し、
//! 1 イベントずつ最後まで処理します（変更とブロードキャストの間に他のイベントは割り込まない）。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 接続時のスナップショット送信
//! - アクションの適用と、送信者を含む全接続へのブロードキャスト
//! - hello / 未知のアクション / 拒否されたアクションではブロードキャストしないこと
//! - 切断時にブロードキャストせず、done_by も変更しないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数の参加者による select / done / lock / reset
//! - エッジケース：hello 前のアクション（"unknown" として記録）、閉じた接続へのブロードキャスト

use std::sync::Arc;

use crate::domain::{
    Action, ActionPolicy, ActionRejected, ConnectionId, MessagePusher, Participant, PusherChannel,
    SharedState, SnapshotEncoder, StateStore, Timestamp,
};
use tallyroom_shared::time::Clock;

use super::registry::SessionRegistry;

/// `on_message` の処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// hello により表示名が更新された
    Renamed,
    /// 共有状態が変更され、ブロードキャストされた
    Broadcast { delivered: usize },
    /// 何もしなかった（未知のアクション、未登録の接続からの hello）
    Ignored,
    /// ポリシーにより拒否された
    Rejected(ActionRejected),
}

/// 共有状態のブロードキャストを行うハブ
pub struct SessionHub<P: MessagePusher> {
    store: StateStore,
    registry: SessionRegistry,
    pusher: P,
    encoder: Arc<dyn SnapshotEncoder>,
    clock: Arc<dyn Clock>,
}

impl<P: MessagePusher> SessionHub<P> {
    pub fn new(
        pusher: P,
        encoder: Arc<dyn SnapshotEncoder>,
        clock: Arc<dyn Clock>,
        policy: ActionPolicy,
    ) -> Self {
        Self {
            store: StateStore::new(policy),
            registry: SessionRegistry::new(),
            pusher,
            encoder,
            clock,
        }
    }

    /// 接続を登録し、その接続にだけ現在のスナップショットを送る
    pub fn on_connect(&mut self, sender: PusherChannel) -> ConnectionId {
        let id = ConnectionId::generate();
        let connected_at = Timestamp::new(self.clock.now_millis());

        self.registry.register(Participant::new(id, connected_at));
        self.pusher.register_client(id, sender);
        tracing::info!(
            "[Connected] Connection '{}' connected ({} total)",
            id,
            self.registry.len()
        );

        match self.encoder.encode(self.store.state()) {
            Ok(snapshot) => {
                if let Err(e) = self.pusher.push_to(&id, &snapshot) {
                    tracing::warn!("Failed to send snapshot to '{}': {}", id, e);
                }
            }
            Err(e) => tracing::error!("Failed to serialize snapshot: {}", e),
        }

        id
    }

    /// デコード済みのアクションを処理する
    pub fn on_message(&mut self, id: ConnectionId, action: Action) -> MessageOutcome {
        let actor = self.registry.name_of(&id);

        let applied = match action {
            Action::Hello(name) => {
                if self.registry.rename(&id, name.clone()) {
                    tracing::info!("  <- hello ({})", name);
                    return MessageOutcome::Renamed;
                }
                tracing::debug!("Ignoring hello from unregistered connection '{}'", id);
                return MessageOutcome::Ignored;
            }
            Action::Unrecognized(name) => {
                tracing::debug!("Ignoring unrecognized action '{}' ({})", name, actor);
                return MessageOutcome::Ignored;
            }
            Action::Select(choice) => {
                tracing::info!("  <- select {} ({})", choice, actor);
                self.store.apply_select(choice, actor)
            }
            Action::Done(name) => {
                tracing::info!("  <- done {} ({})", name, actor);
                self.store.apply_done(name, actor);
                Ok(())
            }
            Action::Lock => {
                tracing::info!("  <- lock ({})", actor);
                self.store.apply_lock(actor);
                Ok(())
            }
            Action::Reset => {
                tracing::info!("  <- reset ({})", actor);
                self.store.apply_reset(actor);
                Ok(())
            }
        };

        match applied {
            Ok(()) => MessageOutcome::Broadcast {
                delivered: self.broadcast_all(),
            },
            Err(reason) => {
                tracing::info!("Rejected action from '{}': {}", id, reason);
                MessageOutcome::Rejected(reason)
            }
        }
    }

    /// 接続を登録解除する
    ///
    /// ブロードキャストは行わず、共有状態（done_by を含む）も変更しない。
    pub fn on_disconnect(&mut self, id: &ConnectionId) -> Option<Participant> {
        let removed = self.registry.remove(id);
        self.pusher.unregister_client(id);

        match &removed {
            Some(participant) => tracing::info!(
                "[Disconnected] Connection '{}' disconnected ({} remaining) ({})",
                id,
                self.registry.len(),
                participant.name
            ),
            None => tracing::debug!("Disconnect for unregistered connection '{}'", id),
        }

        removed
    }

    /// 現在の共有状態を全ての接続に送る
    ///
    /// シリアライズは一度だけ行い、全員に同一の文字列を送る。
    fn broadcast_all(&self) -> usize {
        let snapshot = match self.encoder.encode(self.store.state()) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("Failed to serialize snapshot: {}", e);
                return 0;
            }
        };

        let targets = self.registry.ids();
        let delivered = self.pusher.broadcast(&targets, &snapshot);
        tracing::debug!(
            "Broadcasted snapshot to {}/{} connections",
            delivered,
            targets.len()
        );
        delivered
    }

    pub fn snapshot(&self) -> SharedState {
        self.store.state().clone()
    }

    pub fn participants(&self) -> Vec<Participant> {
        self.registry.participants()
    }
}
