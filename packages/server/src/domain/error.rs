//! ドメイン層のエラー定義

use thiserror::Error;

use super::value_object::ConnectionId;

/// 参加者名のバリデーションエラー（クライアントと共通の規則）
pub use tallyroom_shared::name::NameError;

/// 選択肢（A / B）以外の値が指定された
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("option must be \"A\" or \"B\", got {0:?}")]
pub struct InvalidChoice(pub String);

/// ポリシーによってアクションが拒否された
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionRejected {
    #[error("selection is locked")]
    Locked,
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' is not registered")]
    ClientNotFound(ConnectionId),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// スナップショットのエンコードに失敗した
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to encode snapshot: {0}")]
pub struct SnapshotEncodeError(pub String);
