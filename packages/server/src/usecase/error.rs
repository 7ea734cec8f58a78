//! UseCase 層のエラー定義

use thiserror::Error;

/// SessionGateway のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// hub タスクが停止している
    #[error("session hub is not running")]
    HubUnavailable,
}
