//! Surgery request fetch and mutation flows.
//!
//! Mutations return nothing useful beyond success: every one is followed
//! unconditionally by a full re-fetch, and the fetched list replaces the
//! collection wholesale. All gateway calls complete before any state is
//! touched, so a failure anywhere leaves the collection and the screen
//! exactly as they were (stale-but-consistent, never partially updated).

use uuid::Uuid;

use crate::core_state::{CoreError, CoreState};
use crate::gateway::ApiGateway;
use crate::models::{RequestForm, Role, SurgeryRequest};

/// Fetch the full request list visible to this session and replace the
/// collection. The server scopes: hospitals see their own requests with
/// the interested-doctor projection, doctors see everything.
pub fn refresh(state: &CoreState, api: &dyn ApiGateway) -> Result<Vec<SurgeryRequest>, CoreError> {
    let token = state.token()?;
    let requests = api.list_requests(&token)?;
    state.set_requests(requests.clone())?;
    Ok(requests)
}

/// Submit the request form: create when the form is blank, update when
/// it was opened on an existing request. Ends back on the dashboard with
/// a freshly fetched collection and the edit target cleared.
pub fn submit(
    state: &CoreState,
    api: &dyn ApiGateway,
    form: &RequestForm,
) -> Result<(), CoreError> {
    let session = state.require_role(Role::Hospital)?;
    let editing_id = state.view()?.editing().map(|r| r.id);

    match editing_id {
        Some(id) => {
            api.update_request(&session.token, id, form)?;
            tracing::info!(request_id = %id, "Request updated");
        }
        None => {
            let created = api.create_request(&session.token, form)?;
            tracing::info!(request_id = %created.id, "Request created");
        }
    }
    let requests = api.list_requests(&session.token)?;

    state.set_requests(requests)?;
    state.view_mut()?.form_submitted(Some(Role::Hospital))?;
    Ok(())
}

/// Delete a request. The webview confirms with the user before invoking
/// this; by the time we run, the decision is made.
pub fn delete(state: &CoreState, api: &dyn ApiGateway, id: Uuid) -> Result<(), CoreError> {
    let session = state.require_role(Role::Hospital)?;

    api.delete_request(&session.token, id)?;
    let requests = api.list_requests(&session.token)?;

    state.set_requests(requests)?;
    tracing::info!(request_id = %id, "Request deleted");
    Ok(())
}

/// Fetch one request fresh from the server (detail view).
pub fn detail(
    state: &CoreState,
    api: &dyn ApiGateway,
    id: Uuid,
) -> Result<SurgeryRequest, CoreError> {
    let token = state.token()?;
    Ok(api.request_detail(&token, id)?)
}
