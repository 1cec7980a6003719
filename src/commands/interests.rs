//! Interest IPC commands (doctor side).

use std::sync::Arc;

use tauri::State;
use uuid::Uuid;

use crate::core_state::CoreState;
use crate::interests;
use crate::models::InterestEntry;

/// Fetch this doctor's interests and replace the collection.
#[tauri::command]
pub fn load_my_interests(
    state: State<'_, Arc<CoreState>>,
) -> Result<Vec<InterestEntry>, String> {
    interests::refresh(&state, state.api()).map_err(|e| e.to_string())
}

/// Snapshot of the fetched interests collection.
#[tauri::command]
pub fn get_my_interests(
    state: State<'_, Arc<CoreState>>,
) -> Result<Vec<InterestEntry>, String> {
    state.interests().map_err(|e| e.to_string())
}

/// Express interest in a request; both collections are re-fetched.
#[tauri::command]
pub fn express_interest(
    request_id: String,
    state: State<'_, Arc<CoreState>>,
) -> Result<(), String> {
    let id = Uuid::parse_str(&request_id).map_err(|e| format!("Invalid request ID: {e}"))?;
    interests::express(&state, state.api(), id).map_err(|e| e.to_string())
}

/// Withdraw a previously expressed interest; both collections are
/// re-fetched.
#[tauri::command]
pub fn withdraw_interest(
    request_id: String,
    state: State<'_, Arc<CoreState>>,
) -> Result<(), String> {
    let id = Uuid::parse_str(&request_id).map_err(|e| format!("Invalid request ID: {e}"))?;
    interests::withdraw(&state, state.api(), id).map_err(|e| e.to_string())
}

/// Membership test on the fetched interests collection.
#[tauri::command]
pub fn has_expressed_interest(
    request_id: String,
    state: State<'_, Arc<CoreState>>,
) -> Result<bool, String> {
    let id = Uuid::parse_str(&request_id).map_err(|e| format!("Invalid request ID: {e}"))?;
    state.has_expressed_interest(id).map_err(|e| e.to_string())
}
