//! Tauri commands exposed to the frontend
//!
//! This module organizes commands into logical submodules:
//! - `auth`: sign-in/sign-out and session queries
//! - `notes`: note list, draft form, create and delete
//! - `storage`: image upload

pub mod auth;
pub mod notes;
pub mod storage;

use crate::app::AppState;
use crate::error::Result;
use tauri::State;

// Re-export all commands for convenient registration in main.rs
pub use auth::*;
pub use notes::*;
pub use storage::*;

// ===== General Commands =====

/// Get application information
#[tauri::command]
pub async fn get_app_info(state: State<'_, AppState>) -> Result<AppInfo> {
    Ok(AppInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_url: state.config.api_url.clone(),
    })
}

/// Application information structure
#[derive(serde::Serialize)]
pub struct AppInfo {
    pub version: String,
    pub api_url: String,
}
