//! Interest express/withdraw flows (doctor side).
//!
//! An interest mutation touches both collections — the request list
//! carries the interested-doctor projection and the interest list is the
//! source of the "has interest" membership test — so each mutation is
//! followed unconditionally by both re-fetches. As everywhere, every
//! gateway call completes before any state is replaced.

use uuid::Uuid;

use crate::core_state::{CoreError, CoreState};
use crate::gateway::ApiGateway;
use crate::models::{InterestEntry, Role};

/// Fetch this doctor's interests and replace the collection.
pub fn refresh(state: &CoreState, api: &dyn ApiGateway) -> Result<Vec<InterestEntry>, CoreError> {
    let session = state.require_role(Role::Doctor)?;
    let interests = api.my_interests(&session.token)?;
    state.set_interests(interests.clone())?;
    Ok(interests)
}

/// Express interest in a request, then re-pull both collections.
pub fn express(state: &CoreState, api: &dyn ApiGateway, request_id: Uuid) -> Result<(), CoreError> {
    let session = state.require_role(Role::Doctor)?;

    api.express_interest(&session.token, request_id)?;
    let requests = api.list_requests(&session.token)?;
    let interests = api.my_interests(&session.token)?;

    state.set_requests(requests)?;
    state.set_interests(interests)?;
    tracing::info!(request_id = %request_id, "Interest expressed");
    Ok(())
}

/// Withdraw a previously expressed interest, then re-pull both collections.
pub fn withdraw(
    state: &CoreState,
    api: &dyn ApiGateway,
    request_id: Uuid,
) -> Result<(), CoreError> {
    let session = state.require_role(Role::Doctor)?;

    api.withdraw_interest(&session.token, request_id)?;
    let requests = api.list_requests(&session.token)?;
    let interests = api.my_interests(&session.token)?;

    state.set_requests(requests)?;
    state.set_interests(interests)?;
    tracing::info!(request_id = %request_id, "Interest withdrawn");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockGateway;
    use crate::models::{RequestForm, SurgeryRequest, Urgency, User};
    use crate::session::{Session, SessionStore};
    use crate::view_state::Screen;
    use chrono::NaiveDate;

    fn doctor() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Dr. James Wilson".into(),
            email: "james.wilson@medexus.com".into(),
            role: Role::Doctor,
            institution_name: None,
            specialization: Some("Orthopedic Surgeon".into()),
            bio: None,
        }
    }

    fn hospital() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Dr. Sarah Johnson".into(),
            email: "admin@cityhospital.com".into(),
            role: Role::Hospital,
            institution_name: Some("City General Hospital".into()),
            specialization: None,
            bio: None,
        }
    }

    fn signed_in_state(dir: &tempfile::TempDir, user: User) -> CoreState {
        let state = CoreState::with_parts(
            crate::gateway::ApiClient::new("http://localhost:8001"),
            SessionStore::new(dir.path().join("session")),
        );
        let role = user.role;
        state
            .establish_session(Session::new("mock-token".into(), user))
            .unwrap();
        state.view_mut().unwrap().restored(role);
        state
    }

    fn seeded_gateway(user: User) -> (MockGateway, SurgeryRequest) {
        let gateway = MockGateway::new(user);
        let request = gateway
            .create_request(
                "mock-token",
                &RequestForm {
                    surgery_type: "Hip Replacement".into(),
                    required_specialization: "Orthopedic Surgeon".into(),
                    urgency: Urgency::High,
                    date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
                    location: "Springfield, IL".into(),
                    hospital_name: "City General Hospital".into(),
                    condition_description: None,
                },
            )
            .unwrap();
        (gateway, request)
    }

    #[test]
    fn express_flips_the_membership_test_without_reload() {
        let dir = tempfile::tempdir().unwrap();
        let state = signed_in_state(&dir, doctor());
        let (gateway, request) = seeded_gateway(doctor());
        crate::requests::refresh(&state, &gateway).unwrap();
        assert!(!state.has_expressed_interest(request.id).unwrap());

        express(&state, &gateway, request.id).unwrap();

        assert!(state.has_expressed_interest(request.id).unwrap());
        assert_eq!(
            gateway.calls()[1..],
            ["express_interest", "list_requests", "my_interests"][..],
            "mutation then both authoritative re-reads"
        );
    }

    #[test]
    fn withdraw_flips_it_back() {
        let dir = tempfile::tempdir().unwrap();
        let state = signed_in_state(&dir, doctor());
        let (gateway, request) = seeded_gateway(doctor());
        express(&state, &gateway, request.id).unwrap();

        withdraw(&state, &gateway, request.id).unwrap();

        assert!(!state.has_expressed_interest(request.id).unwrap());
        assert!(state.interests().unwrap().is_empty());
    }

    #[test]
    fn failed_express_leaves_both_collections_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let state = signed_in_state(&dir, doctor());
        let (gateway, request) = seeded_gateway(doctor());
        crate::requests::refresh(&state, &gateway).unwrap();
        let requests_before = state.requests().unwrap();
        let interests_before = state.interests().unwrap();
        gateway.fail_on("express_interest");

        assert!(express(&state, &gateway, request.id).is_err());

        assert_eq!(state.requests().unwrap(), requests_before);
        assert_eq!(state.interests().unwrap(), interests_before);
        assert!(!state.has_expressed_interest(request.id).unwrap());
    }

    #[test]
    fn failed_refetch_after_express_keeps_stale_collections() {
        let dir = tempfile::tempdir().unwrap();
        let state = signed_in_state(&dir, doctor());
        let (gateway, request) = seeded_gateway(doctor());
        crate::requests::refresh(&state, &gateway).unwrap();
        let requests_before = state.requests().unwrap();
        gateway.fail_on("my_interests");

        assert!(express(&state, &gateway, request.id).is_err());

        // The second re-read failed, so neither collection was replaced —
        // not even the request list that fetched successfully.
        assert_eq!(state.requests().unwrap(), requests_before);
        assert!(state.interests().unwrap().is_empty());
        assert_eq!(state.screen().unwrap(), Screen::DoctorDashboard);
    }

    #[test]
    fn hospital_cannot_express_interest() {
        let dir = tempfile::tempdir().unwrap();
        let state = signed_in_state(&dir, hospital());
        let (gateway, request) = seeded_gateway(hospital());

        let err = express(&state, &gateway, request.id).unwrap_err();
        assert_eq!(err.to_string(), "Requires a doctor account");
        assert_eq!(gateway.calls(), vec!["create_request"], "no mutation issued");
    }

    #[test]
    fn refresh_is_doctor_only() {
        let dir = tempfile::tempdir().unwrap();
        let state = signed_in_state(&dir, hospital());
        let gateway = MockGateway::new(hospital());
        assert!(refresh(&state, &gateway).is_err());
    }

    #[test]
    fn duplicate_express_surfaces_the_server_message() {
        let dir = tempfile::tempdir().unwrap();
        let state = signed_in_state(&dir, doctor());
        let (gateway, request) = seeded_gateway(doctor());
        express(&state, &gateway, request.id).unwrap();

        let err = express(&state, &gateway, request.id).unwrap_err();
        assert!(err
            .to_string()
            .contains("Already expressed interest in this request"));
        assert!(state.has_expressed_interest(request.id).unwrap(), "still interested");
    }
}
