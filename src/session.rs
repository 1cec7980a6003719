//! Persisted login session.
//!
//! The bearer token and the user record are stored as two files under the
//! app data directory, independent of any other app data. They are valid
//! only as a pair: a missing, empty, or unparsable half means "no session"
//! and purges both. The store is entirely local — clearing it does not
//! invalidate anything server-side.

use std::fs;
use std::path::PathBuf;

use crate::models::User;

/// File holding the raw bearer token.
const TOKEN_FILE: &str = "token";
/// File holding the serialized user record.
const USER_FILE: &str = "user.json";

/// An authenticated session: the bearer credential plus the user it
/// belongs to. Held in memory by `CoreState` while logged in.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: String, user: User) -> Self {
        Self { token, user }
    }
}

/// Errors from writing the persisted session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable (token, user) store surviving app restarts.
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Store rooted at the given directory (injectable for tests).
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    /// Read the persisted pair back into a `Session`.
    ///
    /// Any defect — a missing file, an empty token, an unparsable user
    /// record — yields `None` and purges whatever half was present, so a
    /// partial session can never survive to the next restore.
    pub fn restore(&self) -> Option<Session> {
        let token = match fs::read_to_string(self.token_path()) {
            Ok(t) => t.trim().to_string(),
            Err(_) => {
                self.clear();
                return None;
            }
        };
        if token.is_empty() {
            tracing::warn!("Persisted session has an empty token, purging");
            self.clear();
            return None;
        }

        let user = match fs::read_to_string(self.user_path()) {
            Ok(content) => match serde_json::from_str::<User>(&content) {
                Ok(user) => user,
                Err(e) => {
                    tracing::warn!(error = %e, "Persisted user record is corrupt, purging session");
                    self.clear();
                    return None;
                }
            },
            Err(_) => {
                self.clear();
                return None;
            }
        };

        Some(Session::new(token, user))
    }

    /// Persist both halves, overwriting any prior session unconditionally.
    pub fn establish(&self, session: &Session) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.token_path(), &session.token)?;
        fs::write(self.user_path(), serde_json::to_string(&session.user)?)?;
        tracing::info!(user_id = %session.user.id, role = %session.user.role, "Session persisted");
        Ok(())
    }

    /// Purge both halves. Idempotent; a half that is already gone is fine.
    pub fn clear(&self) {
        for path in [self.token_path(), self.user_path()] {
            if let Err(e) = fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove session file");
                }
            }
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(crate::config::session_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use uuid::Uuid;

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

    fn store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session"));
        (dir, store)
    }

    #[test]
    fn restore_on_fresh_store_is_none() {
        let (_dir, store) = store();
        assert!(store.restore().is_none());
    }

    #[test]
    fn establish_then_restore_round_trips() {
        let (_dir, store) = store();
        let session = Session::new("tok-abc123".into(), doctor());
        store.establish(&session).unwrap();

        let restored = store.restore().unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn establish_overwrites_prior_session() {
        let (_dir, store) = store();
        store
            .establish(&Session::new("first".into(), doctor()))
            .unwrap();
        let second = Session::new("second".into(), doctor());
        store.establish(&second).unwrap();

        assert_eq!(store.restore().unwrap().token, "second");
    }

    #[test]
    fn clear_purges_both_files() {
        let (_dir, store) = store();
        store
            .establish(&Session::new("tok".into(), doctor()))
            .unwrap();
        store.clear();

        assert!(!store.token_path().exists());
        assert!(!store.user_path().exists());
        assert!(store.restore().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let (_dir, store) = store();
        store.clear();
        store.clear();
        assert!(store.restore().is_none());
    }

    #[test]
    fn corrupt_user_record_purges_both() {
        let (_dir, store) = store();
        store
            .establish(&Session::new("tok".into(), doctor()))
            .unwrap();
        fs::write(store.user_path(), "{not json").unwrap();

        assert!(store.restore().is_none());
        assert!(!store.token_path().exists(), "token purged with user");
        assert!(!store.user_path().exists());
    }

    #[test]
    fn user_record_missing_fields_purges_both() {
        let (_dir, store) = store();
        store
            .establish(&Session::new("tok".into(), doctor()))
            .unwrap();
        fs::write(store.user_path(), r#"{"name": "orphan"}"#).unwrap();

        assert!(store.restore().is_none());
        assert!(!store.token_path().exists());
    }

    #[test]
    fn empty_token_purges_both() {
        let (_dir, store) = store();
        store
            .establish(&Session::new("tok".into(), doctor()))
            .unwrap();
        fs::write(store.token_path(), "   \n").unwrap();

        assert!(store.restore().is_none());
        assert!(!store.user_path().exists(), "user purged with token");
    }

    #[test]
    fn token_without_user_purges_token() {
        let (_dir, store) = store();
        fs::create_dir_all(store.dir.clone()).unwrap();
        fs::write(store.token_path(), "orphan-token").unwrap();

        assert!(store.restore().is_none());
        assert!(!store.token_path().exists());
    }
}
