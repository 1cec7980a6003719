//! Authentication IPC commands.
//!
//! Thin wrappers over `crate::auth`; errors become the `String` the
//! webview renders as a transient banner. Required-field validation
//! lives here, at the input layer, mirroring the backend's rules.

use std::sync::Arc;

use tauri::State;

use crate::auth;
use crate::core_state::CoreState;
use crate::gateway::SignupForm;
use crate::models::{Role, User};

/// Sign in with email and password.
#[tauri::command]
pub fn login(
    email: String,
    password: String,
    state: State<'_, Arc<CoreState>>,
) -> Result<User, String> {
    if email.trim().is_empty() {
        return Err("Email is required".into());
    }
    if password.is_empty() {
        return Err("Password is required".into());
    }

    auth::login(&state, state.api(), email.trim(), &password).map_err(|e| e.to_string())
}

/// Register a new hospital or doctor account and sign straight in.
#[tauri::command]
pub fn signup(form: SignupForm, state: State<'_, Arc<CoreState>>) -> Result<User, String> {
    validate_signup(&form)?;
    auth::signup(&state, state.api(), &form).map_err(|e| e.to_string())
}

/// Sign out and return to the login screen. Local only.
#[tauri::command]
pub fn logout(state: State<'_, Arc<CoreState>>) -> Result<(), String> {
    auth::logout(&state).map_err(|e| e.to_string())
}

/// The signed-in user, if any.
#[tauri::command]
pub fn current_user(state: State<'_, Arc<CoreState>>) -> Result<Option<User>, String> {
    state.current_user().map_err(|e| e.to_string())
}

/// Re-check a restored session against the server. Returns the refreshed
/// user, or `None` (after purging) when the token is stale.
#[tauri::command]
pub fn verify_session(state: State<'_, Arc<CoreState>>) -> Result<Option<User>, String> {
    auth::verify_session(&state, state.api()).map_err(|e| e.to_string())
}

/// Backend rules: name/email/password always, institution name for
/// hospitals, specialization for doctors.
fn validate_signup(form: &SignupForm) -> Result<(), String> {
    if form.name.trim().is_empty() {
        return Err("Name is required".into());
    }
    if form.email.trim().is_empty() {
        return Err("Email is required".into());
    }
    if form.password.is_empty() {
        return Err("Password is required".into());
    }
    match form.role {
        Role::Hospital => {
            if form
                .institution_name
                .as_deref()
                .map_or(true, |s| s.trim().is_empty())
            {
                return Err("Institution name required for hospitals".into());
            }
        }
        Role::Doctor => {
            if form
                .specialization
                .as_deref()
                .map_or(true, |s| s.trim().is_empty())
            {
                return Err("Specialization required for doctors".into());
            }
        }
    }
    Ok(())
}
