//! SnapshotEncoder trait 定義
//!
//! 共有状態をワイヤー形式の文字列に変換するインターフェース。
//! 具体的な形式（JSON）は Infrastructure 層が提供します（依存性の逆転）。

#[cfg(test)]
use mockall::automock;

use super::{entity::SharedState, error::SnapshotEncodeError};

#[cfg_attr(test, automock)]
pub trait SnapshotEncoder: Send + Sync {
    /// スナップショットを 1 つの文字列にエンコードする
    fn encode(&self, state: &SharedState) -> Result<String, SnapshotEncodeError>;
}
