//! 参加者から送られるアクション
//!
//! 受信したメッセージは接続の境界で一度だけデコードされ、この閉じた列挙型になります。
//! 未知のアクション名は `Unrecognized` となり、何も起こしません。

use super::value_object::{Choice, ParticipantName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// 接続の表示名を設定する（共有状態は変更しない）
    Hello(ParticipantName),
    /// 選択肢を選ぶ
    Select(Choice),
    /// 完了を表明する（payload の名前が `done_by` に入る）
    Done(ParticipantName),
    /// 選択をロックする
    Lock,
    /// 共有状態を初期化する
    Reset,
    /// 未知のアクション名
    Unrecognized(String),
}

impl Action {
    /// ログ出力用のアクション名
    pub fn name(&self) -> &str {
        match self {
            Action::Hello(_) => "hello",
            Action::Select(_) => "select",
            Action::Done(_) => "done",
            Action::Lock => "lock",
            Action::Reset => "reset",
            Action::Unrecognized(name) => name,
        }
    }
}
