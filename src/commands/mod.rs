pub mod auth;
pub mod interests;
pub mod navigation;
pub mod requests;

use std::sync::Arc;

use tauri::State;

use crate::core_state::CoreState;
use crate::gateway::ApiGateway;

/// Health check IPC command — verifies backend is running
#[tauri::command]
pub fn health_check() -> String {
    tracing::debug!("Health check called");
    "ok".to_string()
}

/// API availability for the frontend status indicator.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ApiStatus {
    /// Whether the Medexus API answered its health endpoint.
    pub reachable: bool,
    /// Human-readable status summary.
    pub summary: String,
}

/// Proactive check of API availability.
///
/// Called by the frontend on app load to show whether the marketplace
/// is reachable before the user attempts to sign in.
#[tauri::command]
pub fn check_api_status(state: State<'_, Arc<CoreState>>) -> ApiStatus {
    match state.api().health() {
        Ok(health) => ApiStatus {
            reachable: true,
            summary: format!(
                "Medexus API {} at {}",
                health.status,
                state.api().base_url()
            ),
        },
        Err(e) => ApiStatus {
            reachable: false,
            summary: e.to_string(),
        },
    }
}
