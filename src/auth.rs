//! Login, signup, logout and session verification.
//!
//! The gateway call always comes first; state only changes after the
//! server has answered, so a failed call leaves the screen, the session
//! and the collections exactly as they were.

use crate::core_state::{CoreError, CoreState};
use crate::gateway::{ApiError, ApiGateway, SignupForm};
use crate::models::User;
use crate::session::Session;

/// Exchange credentials for a session and land on the role's dashboard.
pub fn login(
    state: &CoreState,
    api: &dyn ApiGateway,
    email: &str,
    password: &str,
) -> Result<User, CoreError> {
    let response = api.login(email, password)?;
    let user = response.user.clone();

    state.establish_session(Session::new(response.access_token, response.user))?;
    state.view_mut()?.signed_in(user.role)?;
    tracing::info!(user_id = %user.id, role = %user.role, "Logged in");
    Ok(user)
}

/// Register a new account; a successful signup signs the user straight in.
pub fn signup(
    state: &CoreState,
    api: &dyn ApiGateway,
    form: &SignupForm,
) -> Result<User, CoreError> {
    let response = api.signup(form)?;
    let user = response.user.clone();

    state.establish_session(Session::new(response.access_token, response.user))?;
    state.view_mut()?.signed_in(user.role)?;
    tracing::info!(user_id = %user.id, role = %user.role, "Account created");
    Ok(user)
}

/// Sign out: purge the persisted session, drop the collections, return
/// to the login screen. Local only — no server call.
pub fn logout(state: &CoreState) -> Result<(), CoreError> {
    state.sign_out()
}

/// Check a restored token against the server.
///
/// The session store validates only shape, not freshness; a token can
/// outlive its account or expire server-side. A 401 here means the
/// session is stale: purge it and fall back to the login screen. Any
/// other failure (API down, network) keeps the session — stale-but-
/// consistent beats logging the user out over a blip.
pub fn verify_session(
    state: &CoreState,
    api: &dyn ApiGateway,
) -> Result<Option<User>, CoreError> {
    let token = match state.token() {
        Ok(token) => token,
        Err(CoreError::NoSession) => return Ok(None),
        Err(e) => return Err(e),
    };

    match api.me(&token) {
        Ok(user) => {
            // Refresh the persisted record with whatever the server holds.
            state.establish_session(Session::new(token, user.clone()))?;
            Ok(Some(user))
        }
        Err(ApiError::Http { status: 401, .. }) => {
            tracing::info!("Stored session rejected by the API, signing out");
            state.sign_out()?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
