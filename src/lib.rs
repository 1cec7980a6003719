pub mod auth;
pub mod commands;
pub mod config;
pub mod core_state;
pub mod gateway;
pub mod interests;
pub mod models;
pub mod requests;
pub mod session;
pub mod view_state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Medexus starting v{}", config::APP_VERSION);

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_dialog::init())
        .manage(Arc::new(core_state::CoreState::new()))
        .setup(|app| {
            use tauri::Manager;

            // A persisted session skips the login screen entirely; a
            // corrupt one is purged silently and we start at login.
            let state = app.state::<Arc<core_state::CoreState>>();
            if state.restore_session().is_none() {
                tracing::info!("No persisted session, starting at login");
            }
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::health_check,
            commands::check_api_status,
            commands::auth::login,
            commands::auth::signup,
            commands::auth::logout,
            commands::auth::current_user,
            commands::auth::verify_session,
            commands::navigation::current_screen,
            commands::navigation::screen_allowed,
            commands::navigation::show_signup,
            commands::navigation::show_login,
            commands::navigation::begin_create_request,
            commands::navigation::begin_edit_request,
            commands::navigation::cancel_request_form,
            commands::navigation::editing_request,
            commands::navigation::show_my_interests,
            commands::navigation::show_doctor_dashboard,
            commands::requests::load_requests,
            commands::requests::get_requests,
            commands::requests::submit_request,
            commands::requests::delete_request,
            commands::requests::get_request_detail,
            commands::interests::load_my_interests,
            commands::interests::get_my_interests,
            commands::interests::express_interest,
            commands::interests::withdraw_interest,
            commands::interests::has_expressed_interest,
        ])
        .run(tauri::generate_context!())
        .expect("error while running Medexus");
}
