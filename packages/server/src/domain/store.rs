//! State Store
//!
//! 共有状態を所有し、アクションを一つずつ適用します。
//! Store は hub タスクが排他的に所有するため、ロックは必要ありません。

use super::{
    entity::{LastAction, SharedState},
    error::ActionRejected,
    value_object::{Choice, ParticipantName},
};

/// アクション適用時のポリシー
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionPolicy {
    /// true の場合、ロック中の `select` を拒否する
    ///
    /// false（デフォルト）の場合はクライアントを信頼し、ロック中でも `select` を適用する。
    pub enforce_lock: bool,
}

/// 共有状態を保持する Store
#[derive(Debug, Default)]
pub struct StateStore {
    state: SharedState,
    policy: ActionPolicy,
}

impl StateStore {
    pub fn new(policy: ActionPolicy) -> Self {
        Self {
            state: SharedState::initial(),
            policy,
        }
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn policy(&self) -> ActionPolicy {
        self.policy
    }

    /// 選択肢を設定
    pub fn apply_select(
        &mut self,
        choice: Choice,
        actor: ParticipantName,
    ) -> Result<(), ActionRejected> {
        if self.policy.enforce_lock && self.state.locked {
            return Err(ActionRejected::Locked);
        }

        self.state.selected_option = Some(choice);
        self.stamp(LastAction::Select(choice), actor);
        Ok(())
    }

    /// 完了者を追加（同じ名前は二度追加されない）
    pub fn apply_done(&mut self, name: ParticipantName, actor: ParticipantName) {
        if !self.state.is_done(&name) {
            self.state.done_by.push(name);
        }
        self.stamp(LastAction::Done, actor);
    }

    /// ロックする（解除する操作は reset のみ）
    pub fn apply_lock(&mut self, actor: ParticipantName) {
        self.state.locked = true;
        self.stamp(LastAction::Locked, actor);
    }

    /// 共有状態を丸ごと置き換える
    pub fn apply_reset(&mut self, actor: ParticipantName) {
        self.state = SharedState::after_reset(actor);
    }

    fn stamp(&mut self, action: LastAction, actor: ParticipantName) {
        self.state.last_action = Some(action);
        self.state.last_by = Some(actor);
    }
}
