//! Data Transfer Objects
//!
//! WebSocket のワイヤー型は `tallyroom_shared::protocol` に定義され、クライアントと共有されます。

pub mod conversion;
pub mod http;

pub use conversion::{DecodeError, JsonSnapshotEncoder, decode_action, encode_snapshot};
