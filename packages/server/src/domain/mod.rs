//! ドメイン層
//!
//! 共有状態（SharedState）とそれを変更するアクション、参加者セッションを定義します。
//! I/O には依存せず、外部への通知は `MessagePusher` / `SnapshotEncoder` trait を通じて行います（依存性の逆転）。

pub mod action;
pub mod encoder;
pub mod entity;
pub mod error;
pub mod pusher;
pub mod store;
pub mod value_object;

pub use action::Action;
#[cfg(test)]
pub use encoder::MockSnapshotEncoder;
pub use encoder::SnapshotEncoder;
pub use entity::{LastAction, Participant, SharedState};
pub use error::{
    ActionRejected, InvalidChoice, MessagePushError, NameError, SnapshotEncodeError,
};
pub use pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use pusher::MockMessagePusher;
pub use store::{ActionPolicy, StateStore};
pub use value_object::{
    Choice, ConnectionId, MAX_NAME_LENGTH, ParticipantName, Timestamp, UNKNOWN_PARTICIPANT,
};
