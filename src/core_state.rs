//! Shared application state.
//!
//! `CoreState` is the single state owned by the Tauri runtime and shared
//! with every IPC command. Uses `RwLock` for concurrent read access; the
//! only writers are the command handlers themselves, which replace the
//! collections wholesale after a re-fetch — never partially.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::gateway::{ApiClient, ApiError};
use crate::models::{InterestEntry, Role, SurgeryRequest, User};
use crate::session::{Session, SessionError, SessionStore};
use crate::view_state::{Screen, ViewState, ViewStateError};

// ═══════════════════════════════════════════════════════════
// CoreState — shared by every IPC command
// ═══════════════════════════════════════════════════════════

/// Application state: session, screen, and the fetched collections.
///
/// Wrapped in `Arc` at startup and managed by Tauri. The gateway client
/// is built once from the environment; the session store points at the
/// app data directory.
pub struct CoreState {
    /// Gateway to the Medexus API, base URL resolved at startup.
    api: ApiClient,
    /// Durable (token, user) storage.
    session_store: SessionStore,
    /// Active session. `None` when signed out.
    session: RwLock<Option<Session>>,
    /// Current screen + form edit target.
    view: RwLock<ViewState>,
    /// Last fetched surgery requests (server-scoped by role).
    requests: RwLock<Vec<SurgeryRequest>>,
    /// Last fetched interests (doctor sessions only).
    interests: RwLock<Vec<InterestEntry>>,
}

impl CoreState {
    /// Production state: env-configured gateway, app-dir session store.
    pub fn new() -> Self {
        Self::with_parts(ApiClient::from_env(), SessionStore::default())
    }

    /// State with injected collaborators (tests point the store at a
    /// temp dir and drive domain functions with a `MockGateway`).
    pub fn with_parts(api: ApiClient, session_store: SessionStore) -> Self {
        Self {
            api,
            session_store,
            session: RwLock::new(None),
            view: RwLock::new(ViewState::new()),
            requests: RwLock::new(Vec::new()),
            interests: RwLock::new(Vec::new()),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    // ── Session ─────────────────────────────────────────────

    /// Restore a persisted session at process start, if one survives.
    /// Moves the view to the role's landing screen on success.
    pub fn restore_session(&self) -> Option<User> {
        let session = self.session_store.restore()?;
        let user = session.user.clone();
        let role = user.role;
        if let Ok(mut guard) = self.session.write() {
            *guard = Some(session);
        }
        if let Ok(mut view) = self.view.write() {
            view.restored(role);
        }
        tracing::info!(user_id = %user.id, role = %role, "Session restored");
        Some(user)
    }

    /// Persist and activate a session (login/signup). The durable write
    /// happens first, so a storage failure leaves memory untouched.
    pub fn establish_session(&self, session: Session) -> Result<(), CoreError> {
        self.session_store.establish(&session)?;
        let mut guard = self.session.write().map_err(|_| CoreError::LockPoisoned)?;
        *guard = Some(session);
        Ok(())
    }

    /// Sign out: purge durable state, drop the session, empty both
    /// collections, land on the login screen. Purely local — the server
    /// keeps no session to invalidate.
    pub fn sign_out(&self) -> Result<(), CoreError> {
        self.session_store.clear();
        *self.session.write().map_err(|_| CoreError::LockPoisoned)? = None;
        self.requests
            .write()
            .map_err(|_| CoreError::LockPoisoned)?
            .clear();
        self.interests
            .write()
            .map_err(|_| CoreError::LockPoisoned)?
            .clear();
        self.view
            .write()
            .map_err(|_| CoreError::LockPoisoned)?
            .logged_out();
        tracing::info!("Signed out");
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>, CoreError> {
        let guard = self.session.read().map_err(|_| CoreError::LockPoisoned)?;
        Ok(guard.as_ref().map(|s| s.user.clone()))
    }

    pub fn session_role(&self) -> Result<Option<Role>, CoreError> {
        let guard = self.session.read().map_err(|_| CoreError::LockPoisoned)?;
        Ok(guard.as_ref().map(|s| s.user.role))
    }

    /// The bearer token, or `NoSession` when signed out.
    pub fn token(&self) -> Result<String, CoreError> {
        let guard = self.session.read().map_err(|_| CoreError::LockPoisoned)?;
        guard
            .as_ref()
            .map(|s| s.token.clone())
            .ok_or(CoreError::NoSession)
    }

    /// Session snapshot after a role check — the entry guard for every
    /// role-gated operation.
    pub fn require_role(&self, required: Role) -> Result<Session, CoreError> {
        let guard = self.session.read().map_err(|_| CoreError::LockPoisoned)?;
        let session = guard.as_ref().ok_or(CoreError::NoSession)?;
        if session.user.role != required {
            return Err(CoreError::RoleForbidden(required));
        }
        Ok(session.clone())
    }

    // ── View state ──────────────────────────────────────────

    pub fn view(&self) -> Result<RwLockReadGuard<'_, ViewState>, CoreError> {
        self.view.read().map_err(|_| CoreError::LockPoisoned)
    }

    pub fn view_mut(&self) -> Result<RwLockWriteGuard<'_, ViewState>, CoreError> {
        self.view.write().map_err(|_| CoreError::LockPoisoned)
    }

    pub fn screen(&self) -> Result<Screen, CoreError> {
        Ok(self.view()?.screen())
    }

    // ── Collections ─────────────────────────────────────────

    pub fn requests(&self) -> Result<Vec<SurgeryRequest>, CoreError> {
        let guard = self.requests.read().map_err(|_| CoreError::LockPoisoned)?;
        Ok(guard.clone())
    }

    /// Replace the request collection wholesale.
    pub fn set_requests(&self, requests: Vec<SurgeryRequest>) -> Result<(), CoreError> {
        *self.requests.write().map_err(|_| CoreError::LockPoisoned)? = requests;
        Ok(())
    }

    pub fn interests(&self) -> Result<Vec<InterestEntry>, CoreError> {
        let guard = self.interests.read().map_err(|_| CoreError::LockPoisoned)?;
        Ok(guard.clone())
    }

    /// Replace the interest collection wholesale.
    pub fn set_interests(&self, interests: Vec<InterestEntry>) -> Result<(), CoreError> {
        *self.interests.write().map_err(|_| CoreError::LockPoisoned)? = interests;
        Ok(())
    }

    /// Find a fetched request by id (for the edit form pre-fill).
    pub fn find_request(&self, id: Uuid) -> Result<Option<SurgeryRequest>, CoreError> {
        let guard = self.requests.read().map_err(|_| CoreError::LockPoisoned)?;
        Ok(guard.iter().find(|r| r.id == id).cloned())
    }

    /// Membership test on the fetched interests collection — the only
    /// way the client derives "has interest".
    pub fn has_expressed_interest(&self, request_id: Uuid) -> Result<bool, CoreError> {
        let guard = self.interests.read().map_err(|_| CoreError::LockPoisoned)?;
        Ok(guard.iter().any(|e| e.interest.request_id == request_id))
    }
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Error types
// ═══════════════════════════════════════════════════════════

/// Errors from state operations. `Display` is the banner text, so the
/// API variant passes its message through untouched.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not signed in")]
    NoSession,
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("Requires a {0} account")]
    RoleForbidden(Role),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    View(#[from] ViewStateError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
