use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Medexus";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the API origin.
pub const API_URL_ENV: &str = "MEDEXUS_API_URL";

/// Default API origin when the environment provides none.
const DEFAULT_API_URL: &str = "http://localhost:8001";

/// Get the application data directory
/// ~/Medexus/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Medexus")
}

/// Get the session directory (persisted token + user record)
pub fn session_dir() -> PathBuf {
    app_data_dir().join("session")
}

/// Resolve the API base URL from the environment.
///
/// Read once at startup when `CoreState` builds its `ApiClient`;
/// changing the variable afterwards has no effect on a running app.
pub fn api_base_url() -> String {
    std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "medexus_lib=info,info"
}
