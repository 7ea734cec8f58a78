//! UseCase 層
//!
//! - `SessionRegistry`: 接続と参加者名の対応を管理
//! - `SessionHub`: Store と Registry を所有し、接続・メッセージ・切断を処理
//! - `HubHandle`: `SessionHub` を単一の tokio タスクで動かし、`SessionGateway` として公開

mod error;
mod gateway;
mod hub_loop;
mod registry;
mod session_hub;

pub use error::GatewayError;
pub use gateway::SessionGateway;
pub use hub_loop::{HubCommand, HubHandle};
pub use registry::SessionRegistry;
pub use session_hub::{MessageOutcome, SessionHub};
