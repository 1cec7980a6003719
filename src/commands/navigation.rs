//! Screen navigation IPC commands.
//!
//! Every transition funnels through `ViewState`'s named functions, so
//! the webview cannot put the app in a screen its role is not allowed
//! to see. The render guard (`screen_allowed`) backs the frontend's
//! decision of whether to draw a screen body at all.

use std::sync::Arc;

use tauri::State;
use uuid::Uuid;

use crate::core_state::CoreState;
use crate::models::SurgeryRequest;
use crate::view_state::Screen;

/// The screen currently selected by the state machine.
#[tauri::command]
pub fn current_screen(state: State<'_, Arc<CoreState>>) -> Result<Screen, String> {
    state.screen().map_err(|e| e.to_string())
}

/// Render guard: may the current session see this screen's body?
#[tauri::command]
pub fn screen_allowed(screen: Screen, state: State<'_, Arc<CoreState>>) -> Result<bool, String> {
    let role = state.session_role().map_err(|e| e.to_string())?;
    Ok(screen.allowed_for(role))
}

/// login → signup ("sign up" link).
#[tauri::command]
pub fn show_signup(state: State<'_, Arc<CoreState>>) -> Result<Screen, String> {
    state
        .view_mut()
        .map_err(|e| e.to_string())?
        .show_signup()
        .map_err(|e| e.to_string())?;
    state.screen().map_err(|e| e.to_string())
}

/// signup → login ("login" link).
#[tauri::command]
pub fn show_login(state: State<'_, Arc<CoreState>>) -> Result<Screen, String> {
    state
        .view_mut()
        .map_err(|e| e.to_string())?
        .show_login()
        .map_err(|e| e.to_string())?;
    state.screen().map_err(|e| e.to_string())
}

/// Open the request form blank (hospital only).
#[tauri::command]
pub fn begin_create_request(state: State<'_, Arc<CoreState>>) -> Result<Screen, String> {
    let role = state.session_role().map_err(|e| e.to_string())?;
    state
        .view_mut()
        .map_err(|e| e.to_string())?
        .begin_create(role)
        .map_err(|e| e.to_string())?;
    state.screen().map_err(|e| e.to_string())
}

/// Open the request form pre-filled from an already-fetched request.
#[tauri::command]
pub fn begin_edit_request(
    request_id: String,
    state: State<'_, Arc<CoreState>>,
) -> Result<Screen, String> {
    let id = Uuid::parse_str(&request_id).map_err(|e| format!("Invalid request ID: {e}"))?;
    let request = state
        .find_request(id)
        .map_err(|e| e.to_string())?
        .ok_or("Request not found")?;

    let role = state.session_role().map_err(|e| e.to_string())?;
    state
        .view_mut()
        .map_err(|e| e.to_string())?
        .begin_edit(role, request)
        .map_err(|e| e.to_string())?;
    state.screen().map_err(|e| e.to_string())
}

/// Abandon the form: reset the edit target, back to the dashboard.
#[tauri::command]
pub fn cancel_request_form(state: State<'_, Arc<CoreState>>) -> Result<Screen, String> {
    let role = state.session_role().map_err(|e| e.to_string())?;
    state
        .view_mut()
        .map_err(|e| e.to_string())?
        .form_cancelled(role)
        .map_err(|e| e.to_string())?;
    state.screen().map_err(|e| e.to_string())
}

/// The request pre-filling the form, when editing.
#[tauri::command]
pub fn editing_request(
    state: State<'_, Arc<CoreState>>,
) -> Result<Option<SurgeryRequest>, String> {
    Ok(state.view().map_err(|e| e.to_string())?.editing().cloned())
}

/// doctor-dashboard → my-interests.
#[tauri::command]
pub fn show_my_interests(state: State<'_, Arc<CoreState>>) -> Result<Screen, String> {
    let role = state.session_role().map_err(|e| e.to_string())?;
    state
        .view_mut()
        .map_err(|e| e.to_string())?
        .show_interests(role)
        .map_err(|e| e.to_string())?;
    state.screen().map_err(|e| e.to_string())
}

/// my-interests → doctor-dashboard.
#[tauri::command]
pub fn show_doctor_dashboard(state: State<'_, Arc<CoreState>>) -> Result<Screen, String> {
    let role = state.session_role().map_err(|e| e.to_string())?;
    state
        .view_mut()
        .map_err(|e| e.to_string())?
        .show_dashboard(role)
        .map_err(|e| e.to_string())?;
    state.screen().map_err(|e| e.to_string())
}
