//! エンティティ

use super::value_object::{Choice, ConnectionId, ParticipantName, Timestamp};

/// サーバーが保持する唯一の共有状態
///
/// `done_by` は重複を含まず、追加順を保持します。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedState {
    pub locked: bool,
    pub selected_option: Option<Choice>,
    pub done_by: Vec<ParticipantName>,
    pub last_action: Option<LastAction>,
    pub last_by: Option<ParticipantName>,
}

impl SharedState {
    /// 起動直後の状態
    pub fn initial() -> Self {
        Self::default()
    }

    /// `reset` 直後の状態
    ///
    /// 初期状態と同じだが、`last_action` / `last_by` には reset 自体が記録される。
    pub fn after_reset(actor: ParticipantName) -> Self {
        Self {
            last_action: Some(LastAction::Reset),
            last_by: Some(actor),
            ..Self::initial()
        }
    }

    pub fn is_done(&self, name: &ParticipantName) -> bool {
        self.done_by.contains(name)
    }
}

/// 最後に受理されたアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastAction {
    Select(Choice),
    Done,
    Locked,
    Reset,
}

impl LastAction {
    /// ワイヤー上のラベル（"select A", "done", "locked", "reset"）
    pub fn label(&self) -> String {
        match self {
            LastAction::Select(choice) => format!("select {}", choice),
            LastAction::Done => "done".to_string(),
            LastAction::Locked => "locked".to_string(),
            LastAction::Reset => "reset".to_string(),
        }
    }
}

/// 接続中の参加者（レジストリのエントリ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ConnectionId,
    pub name: ParticipantName,
    pub connected_at: Timestamp,
}

impl Participant {
    /// 名前未設定（"unknown"）の参加者を作成
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            name: ParticipantName::unknown(),
            connected_at,
        }
    }

    pub fn rename(&mut self, name: ParticipantName) {
        self.name = name;
    }
}
