//! REST gateway to the Medexus API.
//!
//! One call path: every request goes through `ApiClient::send`, which
//! attaches the bearer credential when one is supplied, JSON-encodes the
//! body, and normalizes every failure into `ApiError`. Callers never see
//! transport detail beyond the error's message text. No retries; a hung
//! request blocks its caller until the transport gives up.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Interest, InterestEntry, RequestForm, Role, SurgeryRequest, User};

/// Errors from gateway calls. The `Display` text is what the webview
/// shows in the transient error banner, so server-provided detail is
/// carried through verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Cannot reach the Medexus API at {0}")]
    Connection(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Unexpected response from the API: {0}")]
    ResponseParsing(String),
    #[error("HTTP client error: {0}")]
    Transport(String),
}

/// Successful login/signup payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub user: User,
}

/// Signup form. `institution_name` is required for hospitals,
/// `specialization` for doctors; the backend rejects mismatches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// GET /api/health payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

/// Request body for POST /api/auth/login
#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Request body for POST /api/interests
#[derive(Serialize)]
struct InterestCreateRequest {
    request_id: Uuid,
}

/// Ack body returned by the DELETE endpoints.
#[derive(Deserialize)]
struct Ack {
    #[serde(default)]
    #[allow(dead_code)]
    message: Option<String>,
}

/// Error body the backend sends on rejection. Validation failures carry
/// a structured `detail` that is not a string; those fall back to the
/// generic status-code message.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// The full Medexus REST surface, seamed as a trait so orchestration can
/// be exercised against `MockGateway` without a network.
pub trait ApiGateway: Send + Sync {
    fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;
    fn signup(&self, form: &SignupForm) -> Result<AuthResponse, ApiError>;
    fn me(&self, token: &str) -> Result<User, ApiError>;
    fn health(&self) -> Result<HealthStatus, ApiError>;
    fn list_requests(&self, token: &str) -> Result<Vec<SurgeryRequest>, ApiError>;
    fn request_detail(&self, token: &str, id: Uuid) -> Result<SurgeryRequest, ApiError>;
    fn create_request(&self, token: &str, form: &RequestForm)
        -> Result<SurgeryRequest, ApiError>;
    fn update_request(
        &self,
        token: &str,
        id: Uuid,
        form: &RequestForm,
    ) -> Result<SurgeryRequest, ApiError>;
    fn delete_request(&self, token: &str, id: Uuid) -> Result<(), ApiError>;
    fn my_interests(&self, token: &str) -> Result<Vec<InterestEntry>, ApiError>;
    fn express_interest(&self, token: &str, request_id: Uuid) -> Result<Interest, ApiError>;
    fn withdraw_interest(&self, token: &str, request_id: Uuid) -> Result<(), ApiError>;
}

/// Blocking HTTP client for the Medexus API.
pub struct ApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    /// Create a client for the given API origin.
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Client for the origin configured in the environment.
    pub fn from_env() -> Self {
        Self::new(&crate::config::api_base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The single call path every endpoint goes through.
    fn send<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method, &url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(|e| {
            if e.is_connect() {
                ApiError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                ApiError::Transport("Request timed out".to_string())
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(err) => err.detail,
                Err(_) => format!("HTTP error, status {}", status.as_u16()),
            };
            tracing::debug!(status = status.as_u16(), %url, "API call rejected");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .map_err(|e| ApiError::ResponseParsing(e.to_string()))
    }
}

const NO_BODY: Option<&()> = None;

impl ApiGateway for ApiClient {
    fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.send(
            reqwest::Method::POST,
            "/api/auth/login",
            None,
            Some(&LoginRequest { email, password }),
        )
    }

    fn signup(&self, form: &SignupForm) -> Result<AuthResponse, ApiError> {
        self.send(reqwest::Method::POST, "/api/auth/signup", None, Some(form))
    }

    fn me(&self, token: &str) -> Result<User, ApiError> {
        self.send(reqwest::Method::GET, "/api/auth/me", Some(token), NO_BODY)
    }

    fn health(&self) -> Result<HealthStatus, ApiError> {
        self.send(reqwest::Method::GET, "/api/health", None, NO_BODY)
    }

    fn list_requests(&self, token: &str) -> Result<Vec<SurgeryRequest>, ApiError> {
        self.send(reqwest::Method::GET, "/api/requests", Some(token), NO_BODY)
    }

    fn request_detail(&self, token: &str, id: Uuid) -> Result<SurgeryRequest, ApiError> {
        self.send(
            reqwest::Method::GET,
            &format!("/api/requests/{id}"),
            Some(token),
            NO_BODY,
        )
    }

    fn create_request(
        &self,
        token: &str,
        form: &RequestForm,
    ) -> Result<SurgeryRequest, ApiError> {
        self.send(
            reqwest::Method::POST,
            "/api/requests",
            Some(token),
            Some(form),
        )
    }

    fn update_request(
        &self,
        token: &str,
        id: Uuid,
        form: &RequestForm,
    ) -> Result<SurgeryRequest, ApiError> {
        self.send(
            reqwest::Method::PUT,
            &format!("/api/requests/{id}"),
            Some(token),
            Some(form),
        )
    }

    fn delete_request(&self, token: &str, id: Uuid) -> Result<(), ApiError> {
        let _: Ack = self.send(
            reqwest::Method::DELETE,
            &format!("/api/requests/{id}"),
            Some(token),
            NO_BODY,
        )?;
        Ok(())
    }

    fn my_interests(&self, token: &str) -> Result<Vec<InterestEntry>, ApiError> {
        self.send(
            reqwest::Method::GET,
            "/api/interests/me",
            Some(token),
            NO_BODY,
        )
    }

    fn express_interest(&self, token: &str, request_id: Uuid) -> Result<Interest, ApiError> {
        self.send(
            reqwest::Method::POST,
            "/api/interests",
            Some(token),
            Some(&InterestCreateRequest { request_id }),
        )
    }

    fn withdraw_interest(&self, token: &str, request_id: Uuid) -> Result<(), ApiError> {
        let _: Ack = self.send(
            reqwest::Method::DELETE,
            &format!("/api/interests/{request_id}"),
            Some(token),
            NO_BODY,
        )?;
        Ok(())
    }
}

/// In-memory gateway for tests — behaves like a tiny Medexus backend.
///
/// Holds mutable request/interest collections, records every call by
/// name so tests can assert the re-fetch-after-mutation contract, and
/// can be told to reject named operations.
pub struct MockGateway {
    user: User,
    token: String,
    requests: std::sync::Mutex<Vec<SurgeryRequest>>,
    interests: std::sync::Mutex<Vec<InterestEntry>>,
    failing: std::sync::Mutex<std::collections::HashMap<&'static str, (u16, String)>>,
    calls: std::sync::Mutex<Vec<&'static str>>,
}

impl MockGateway {
    pub fn new(user: User) -> Self {
        Self {
            user,
            token: "mock-token".to_string(),
            requests: std::sync::Mutex::new(Vec::new()),
            interests: std::sync::Mutex::new(Vec::new()),
            failing: std::sync::Mutex::new(std::collections::HashMap::new()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_requests(self, requests: Vec<SurgeryRequest>) -> Self {
        *self.requests.lock().unwrap() = requests;
        self
    }

    /// Make the named operation fail with a server-style rejection.
    pub fn fail_on(&self, op: &'static str) {
        self.fail_with(op, 500, format!("{op} rejected by test gateway"));
    }

    /// Fail the named operation with a specific status and message.
    pub fn fail_with(&self, op: &'static str, status: u16, message: String) {
        self.failing.lock().unwrap().insert(op, (status, message));
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, op: &'static str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(op);
        if let Some((status, message)) = self.failing.lock().unwrap().get(op) {
            return Err(ApiError::Http {
                status: *status,
                message: message.clone(),
            });
        }
        Ok(())
    }

    fn auth_response(&self) -> AuthResponse {
        AuthResponse {
            access_token: self.token.clone(),
            token_type: "bearer".to_string(),
            user: self.user.clone(),
        }
    }
}

impl ApiGateway for MockGateway {
    fn login(&self, _email: &str, _password: &str) -> Result<AuthResponse, ApiError> {
        self.enter("login")?;
        Ok(self.auth_response())
    }

    fn signup(&self, _form: &SignupForm) -> Result<AuthResponse, ApiError> {
        self.enter("signup")?;
        Ok(self.auth_response())
    }

    fn me(&self, _token: &str) -> Result<User, ApiError> {
        self.enter("me")?;
        Ok(self.user.clone())
    }

    fn health(&self) -> Result<HealthStatus, ApiError> {
        self.enter("health")?;
        Ok(HealthStatus {
            status: "healthy".to_string(),
            timestamp: "2025-03-01T00:00:00".to_string(),
        })
    }

    fn list_requests(&self, _token: &str) -> Result<Vec<SurgeryRequest>, ApiError> {
        self.enter("list_requests")?;
        Ok(self.requests.lock().unwrap().clone())
    }

    fn request_detail(&self, _token: &str, id: Uuid) -> Result<SurgeryRequest, ApiError> {
        self.enter("request_detail")?;
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(ApiError::Http {
                status: 404,
                message: "Request not found".to_string(),
            })
    }

    fn create_request(
        &self,
        _token: &str,
        form: &RequestForm,
    ) -> Result<SurgeryRequest, ApiError> {
        self.enter("create_request")?;
        let request = SurgeryRequest {
            id: Uuid::new_v4(),
            hospital_id: self.user.id,
            surgery_type: form.surgery_type.clone(),
            required_specialization: form.required_specialization.clone(),
            urgency: form.urgency,
            date: form.date,
            location: form.location.clone(),
            hospital_name: form.hospital_name.clone(),
            condition_description: form.condition_description.clone(),
            created_at: chrono::Utc::now().naive_utc(),
            interested_doctors: Vec::new(),
        };
        self.requests.lock().unwrap().push(request.clone());
        Ok(request)
    }

    fn update_request(
        &self,
        _token: &str,
        id: Uuid,
        form: &RequestForm,
    ) -> Result<SurgeryRequest, ApiError> {
        self.enter("update_request")?;
        let mut requests = self.requests.lock().unwrap();
        let existing = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ApiError::Http {
                status: 404,
                message: "Request not found".to_string(),
            })?;
        existing.surgery_type = form.surgery_type.clone();
        existing.required_specialization = form.required_specialization.clone();
        existing.urgency = form.urgency;
        existing.date = form.date;
        existing.location = form.location.clone();
        existing.hospital_name = form.hospital_name.clone();
        existing.condition_description = form.condition_description.clone();
        Ok(existing.clone())
    }

    fn delete_request(&self, _token: &str, id: Uuid) -> Result<(), ApiError> {
        self.enter("delete_request")?;
        self.requests.lock().unwrap().retain(|r| r.id != id);
        // Backend cascades: interests referencing the request go with it.
        self.interests
            .lock()
            .unwrap()
            .retain(|e| e.interest.request_id != id);
        Ok(())
    }

    fn my_interests(&self, _token: &str) -> Result<Vec<InterestEntry>, ApiError> {
        self.enter("my_interests")?;
        Ok(self.interests.lock().unwrap().clone())
    }

    fn express_interest(&self, _token: &str, request_id: Uuid) -> Result<Interest, ApiError> {
        self.enter("express_interest")?;
        let request = self
            .requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == request_id)
            .cloned()
            .ok_or(ApiError::Http {
                status: 404,
                message: "Request not found".to_string(),
            })?;
        let mut interests = self.interests.lock().unwrap();
        if interests.iter().any(|e| e.interest.request_id == request_id) {
            return Err(ApiError::Http {
                status: 400,
                message: "Already expressed interest in this request".to_string(),
            });
        }
        let interest = Interest {
            id: Uuid::new_v4(),
            request_id,
            doctor_id: self.user.id,
            timestamp: chrono::Utc::now().naive_utc(),
        };
        interests.push(InterestEntry {
            interest: interest.clone(),
            request,
        });
        Ok(interest)
    }

    fn withdraw_interest(&self, _token: &str, request_id: Uuid) -> Result<(), ApiError> {
        self.enter("withdraw_interest")?;
        let mut interests = self.interests.lock().unwrap();
        let before = interests.len();
        interests.retain(|e| e.interest.request_id != request_id);
        if interests.len() == before {
            return Err(ApiError::Http {
                status: 404,
                message: "Interest not found".to_string(),
            });
        }
        Ok(())
    }
}
