//! Screen state machine.
//!
//! One discrete screen value plus the request being edited (if any),
//! mutated only through named transition functions. Every transition
//! validates the source screen and the session role, so a doctor session
//! can never reach a hospital screen and vice versa. Pure — no locks, no
//! IO — and owned by `CoreState` behind an `RwLock`.

use serde::{Deserialize, Serialize};

use crate::models::{Role, SurgeryRequest};

/// The six rendered screens. Kebab-case on the wire to the webview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    Login,
    Signup,
    HospitalDashboard,
    CreateRequest,
    DoctorDashboard,
    MyInterests,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::HospitalDashboard => "hospital-dashboard",
            Self::CreateRequest => "create-request",
            Self::DoctorDashboard => "doctor-dashboard",
            Self::MyInterests => "my-interests",
        }
    }

    /// The role a screen's body requires, if any.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::Login | Self::Signup => None,
            Self::HospitalDashboard | Self::CreateRequest => Some(Role::Hospital),
            Self::DoctorDashboard | Self::MyInterests => Some(Role::Doctor),
        }
    }

    /// Render guard: whether a session with the given role may see this
    /// screen's body. Evaluated before render, not at the route level.
    pub fn allowed_for(&self, role: Option<Role>) -> bool {
        match self.required_role() {
            None => true,
            Some(required) => role == Some(required),
        }
    }

    /// Landing screen after login, signup, or session restore.
    pub fn landing_for(role: Role) -> Self {
        match role {
            Role::Hospital => Self::HospitalDashboard,
            Role::Doctor => Self::DoctorDashboard,
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from rejected transitions.
#[derive(Debug, thiserror::Error)]
pub enum ViewStateError {
    #[error("Not available on the {0} screen")]
    WrongScreen(Screen),
    #[error("Requires a {0} account")]
    RoleRequired(Role),
    #[error("Not signed in")]
    NotSignedIn,
}

/// Current screen plus the form's edit target.
#[derive(Debug, Clone)]
pub struct ViewState {
    screen: Screen,
    editing: Option<SurgeryRequest>,
}

impl ViewState {
    /// Initial state: the login screen.
    pub fn new() -> Self {
        Self {
            screen: Screen::Login,
            editing: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The request pre-filling the form, when editing an existing one.
    pub fn editing(&self) -> Option<&SurgeryRequest> {
        self.editing.as_ref()
    }

    fn require(&self, role: Option<Role>, required: Role) -> Result<(), ViewStateError> {
        match role {
            Some(r) if r == required => Ok(()),
            Some(_) => Err(ViewStateError::RoleRequired(required)),
            None => Err(ViewStateError::NotSignedIn),
        }
    }

    // ── Auth screens ─────────────────────────────────────────

    /// login → signup ("sign up" link).
    pub fn show_signup(&mut self) -> Result<(), ViewStateError> {
        match self.screen {
            Screen::Login => {
                self.screen = Screen::Signup;
                Ok(())
            }
            other => Err(ViewStateError::WrongScreen(other)),
        }
    }

    /// signup → login ("login" link).
    pub fn show_login(&mut self) -> Result<(), ViewStateError> {
        match self.screen {
            Screen::Signup => {
                self.screen = Screen::Login;
                Ok(())
            }
            other => Err(ViewStateError::WrongScreen(other)),
        }
    }

    /// Successful login or signup lands on the role's dashboard.
    pub fn signed_in(&mut self, role: Role) -> Result<(), ViewStateError> {
        match self.screen {
            Screen::Login | Screen::Signup => {
                self.screen = Screen::landing_for(role);
                self.editing = None;
                Ok(())
            }
            other => Err(ViewStateError::WrongScreen(other)),
        }
    }

    /// Session restore at process start skips the login screen entirely.
    pub fn restored(&mut self, role: Role) {
        self.screen = Screen::landing_for(role);
        self.editing = None;
    }

    /// Logout always lands back on login, from anywhere.
    pub fn logged_out(&mut self) {
        self.screen = Screen::Login;
        self.editing = None;
    }

    // ── Hospital screens ─────────────────────────────────────

    /// hospital-dashboard → create-request with a blank form.
    pub fn begin_create(&mut self, role: Option<Role>) -> Result<(), ViewStateError> {
        self.require(role, Role::Hospital)?;
        match self.screen {
            Screen::HospitalDashboard => {
                self.screen = Screen::CreateRequest;
                self.editing = None;
                Ok(())
            }
            other => Err(ViewStateError::WrongScreen(other)),
        }
    }

    /// hospital-dashboard → create-request pre-filled from a request.
    pub fn begin_edit(
        &mut self,
        role: Option<Role>,
        request: SurgeryRequest,
    ) -> Result<(), ViewStateError> {
        self.require(role, Role::Hospital)?;
        match self.screen {
            Screen::HospitalDashboard => {
                self.screen = Screen::CreateRequest;
                self.editing = Some(request);
                Ok(())
            }
            other => Err(ViewStateError::WrongScreen(other)),
        }
    }

    /// Successful create/update submit returns to the dashboard.
    pub fn form_submitted(&mut self, role: Option<Role>) -> Result<(), ViewStateError> {
        self.require(role, Role::Hospital)?;
        match self.screen {
            Screen::CreateRequest => {
                self.screen = Screen::HospitalDashboard;
                self.editing = None;
                Ok(())
            }
            other => Err(ViewStateError::WrongScreen(other)),
        }
    }

    /// Cancel resets the form and returns to the dashboard.
    pub fn form_cancelled(&mut self, role: Option<Role>) -> Result<(), ViewStateError> {
        self.require(role, Role::Hospital)?;
        match self.screen {
            Screen::CreateRequest => {
                self.screen = Screen::HospitalDashboard;
                self.editing = None;
                Ok(())
            }
            other => Err(ViewStateError::WrongScreen(other)),
        }
    }

    // ── Doctor screens ───────────────────────────────────────

    /// doctor-dashboard → my-interests.
    pub fn show_interests(&mut self, role: Option<Role>) -> Result<(), ViewStateError> {
        self.require(role, Role::Doctor)?;
        match self.screen {
            Screen::DoctorDashboard => {
                self.screen = Screen::MyInterests;
                Ok(())
            }
            other => Err(ViewStateError::WrongScreen(other)),
        }
    }

    /// my-interests → doctor-dashboard.
    pub fn show_dashboard(&mut self, role: Option<Role>) -> Result<(), ViewStateError> {
        self.require(role, Role::Doctor)?;
        match self.screen {
            Screen::MyInterests => {
                self.screen = Screen::DoctorDashboard;
                Ok(())
            }
            other => Err(ViewStateError::WrongScreen(other)),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
