//! MessagePusher trait 定義
//!
//! 参加者へのメッセージ送信（通知）のインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use tokio::sync::mpsc;

#[cfg(test)]
use mockall::automock;

use super::{error::MessagePushError, value_object::ConnectionId};

/// 接続ごとの送信チャンネル
///
/// 受信側は UI 層で WebSocket の sink に接続されます。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// 送信はノンブロッキングで、hub タスクの 1 ステップの中で完結します。
#[cfg_attr(test, automock)]
pub trait MessagePusher: Send {
    /// 接続の送信チャンネルを登録
    fn register_client(&mut self, id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除
    fn unregister_client(&mut self, id: &ConnectionId);

    /// 特定の接続にメッセージを送信
    fn push_to(&self, id: &ConnectionId, content: &str) -> Result<(), MessagePushError>;

    /// 複数の接続に同一のメッセージを送信
    ///
    /// 一部の送信失敗は許容し、配送できた接続の数を返す。
    fn broadcast(&self, targets: &[ConnectionId], content: &str) -> usize;
}
