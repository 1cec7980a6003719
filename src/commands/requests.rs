//! Surgery request IPC commands.

use std::sync::Arc;

use tauri::State;
use uuid::Uuid;

use crate::core_state::CoreState;
use crate::models::{RequestFilter, RequestForm, SurgeryRequest};
use crate::requests;

/// Fetch the request list for this session and replace the collection.
#[tauri::command]
pub fn load_requests(
    state: State<'_, Arc<CoreState>>,
) -> Result<Vec<SurgeryRequest>, String> {
    requests::refresh(&state, state.api()).map_err(|e| e.to_string())
}

/// Snapshot of the fetched collection, narrowed by the client-side
/// filter. The filter itself lives in the webview and is passed per
/// call — it is transient view state, never persisted.
#[tauri::command]
pub fn get_requests(
    filter: Option<RequestFilter>,
    state: State<'_, Arc<CoreState>>,
) -> Result<Vec<SurgeryRequest>, String> {
    let all = state.requests().map_err(|e| e.to_string())?;
    Ok(match filter {
        Some(filter) => filter.apply(&all),
        None => all,
    })
}

/// Submit the request form — create when blank, update when editing.
#[tauri::command]
pub fn submit_request(
    form: RequestForm,
    state: State<'_, Arc<CoreState>>,
) -> Result<(), String> {
    validate_form(&form)?;
    requests::submit(&state, state.api(), &form).map_err(|e| e.to_string())
}

/// Delete a request. The webview's confirm dialog runs before this is
/// ever invoked.
#[tauri::command]
pub fn delete_request(
    request_id: String,
    state: State<'_, Arc<CoreState>>,
) -> Result<(), String> {
    let id = Uuid::parse_str(&request_id).map_err(|e| format!("Invalid request ID: {e}"))?;
    requests::delete(&state, state.api(), id).map_err(|e| e.to_string())
}

/// Fetch one request fresh from the server.
#[tauri::command]
pub fn get_request_detail(
    request_id: String,
    state: State<'_, Arc<CoreState>>,
) -> Result<SurgeryRequest, String> {
    let id = Uuid::parse_str(&request_id).map_err(|e| format!("Invalid request ID: {e}"))?;
    requests::detail(&state, state.api(), id).map_err(|e| e.to_string())
}

/// Required-field validation at the input layer; the backend enforces
/// the same rules again.
fn validate_form(form: &RequestForm) -> Result<(), String> {
    if form.surgery_type.trim().is_empty() {
        return Err("Surgery type is required".into());
    }
    if form.required_specialization.trim().is_empty() {
        return Err("Required specialization is required".into());
    }
    if form.location.trim().is_empty() {
        return Err("Location is required".into());
    }
    if form.hospital_name.trim().is_empty() {
        return Err("Hospital name is required".into());
    }
    Ok(())
}
