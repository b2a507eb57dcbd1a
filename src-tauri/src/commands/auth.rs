//! Authentication commands
//!
//! Thin wrappers over the session service; credentials are verified by the
//! platform's auth service, never locally.

use crate::app::AppState;
use crate::error::Result;
use chrono::{DateTime, Utc};
use tauri::State;

/// Signed-in user information returned to the frontend
#[derive(serde::Serialize)]
pub struct UserInfo {
    pub username: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Sign in with platform credentials
#[tauri::command]
pub async fn sign_in(
    state: State<'_, AppState>,
    username: String,
    password: String,
) -> Result<UserInfo> {
    let session = state.session.sign_in(&username, &password).await?;

    Ok(UserInfo {
        username: session.username,
        signed_in_at: session.signed_in_at,
    })
}

/// Sign out and clear the local session
#[tauri::command]
pub async fn sign_out(state: State<'_, AppState>) -> Result<()> {
    state.session.sign_out().await
}

/// Get the currently signed-in user, if any
#[tauri::command]
pub async fn current_user(state: State<'_, AppState>) -> Result<Option<String>> {
    Ok(state.session.current_user().await)
}
