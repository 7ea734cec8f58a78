//! Session Registry
//!
//! 接続中の参加者と表示名の対応を管理します。
//! 状態は持たず、集合としてのメンバーシップのみを扱います。

use std::collections::HashMap;

use crate::domain::{ConnectionId, Participant, ParticipantName};

#[derive(Debug, Default)]
pub struct SessionRegistry {
    participants: HashMap<ConnectionId, Participant>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 参加者を登録
    pub fn register(&mut self, participant: Participant) {
        self.participants.insert(participant.id, participant);
    }

    /// 表示名を更新（再度の hello は上書きする）
    ///
    /// 未登録の接続の場合は false を返す。
    pub fn rename(&mut self, id: &ConnectionId, name: ParticipantName) -> bool {
        match self.participants.get_mut(id) {
            Some(participant) => {
                participant.rename(name);
                true
            }
            None => false,
        }
    }

    /// 参加者を削除
    pub fn remove(&mut self, id: &ConnectionId) -> Option<Participant> {
        self.participants.remove(id)
    }

    /// 接続の表示名（未登録なら "unknown"）
    pub fn name_of(&self, id: &ConnectionId) -> ParticipantName {
        self.participants
            .get(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(ParticipantName::unknown)
    }

    /// 全ての接続 ID
    pub fn ids(&self) -> Vec<ConnectionId> {
        self.participants.keys().copied().collect()
    }

    /// 参加者リスト（接続時刻順）
    pub fn participants(&self) -> Vec<Participant> {
        let mut participants: Vec<Participant> = self.participants.values().cloned().collect();
        participants.sort_by(|a, b| {
            a.connected_at
                .cmp(&b.connected_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
