//! SessionGateway trait 定義
//!
//! UI 層が hub と対話するためのインターフェース。
//! UI 層はこの trait に依存し、hub の実行方法（タスク・チャンネル）には依存しない。

use async_trait::async_trait;

use crate::domain::{Action, ConnectionId, Participant, PusherChannel, SharedState};

use super::error::GatewayError;

#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// 接続を登録し、現在のスナップショットを `sender` に送る
    ///
    /// 戻り値が返った時点でスナップショットは `sender` に積まれている。
    async fn connect(&self, sender: PusherChannel) -> Result<ConnectionId, GatewayError>;

    /// デコード済みのアクションを到着順に処理させる
    fn submit(&self, id: ConnectionId, action: Action) -> Result<(), GatewayError>;

    /// 接続を登録解除する（ブロードキャストは行わない）
    fn disconnect(&self, id: ConnectionId) -> Result<(), GatewayError>;

    /// 現在の共有状態
    async fn snapshot(&self) -> Result<SharedState, GatewayError>;

    /// 接続中の参加者（接続順）
    async fn participants(&self) -> Result<Vec<Participant>, GatewayError>;
}
