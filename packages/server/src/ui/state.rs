//! Shared application state.

use std::sync::Arc;

use crate::usecase::SessionGateway;

/// Shared application state
pub struct AppState {
    /// SessionGateway（hub タスクへの窓口）
    pub gateway: Arc<dyn SessionGateway>,
}
