//! Application state and initialization
//!
//! This module wires the platform clients to the services and makes them
//! available to commands through AppState.

use crate::api;
use crate::api::auth::{new_session_store, AuthClient};
use crate::api::graphql::GraphqlClient;
use crate::config::PlatformConfig;
use crate::error::Result;
use crate::services::{NotesService, SessionService};
use crate::storage::HttpObjectStore;
use std::sync::Arc;
use tauri::{App, Manager};

/// Concrete service types used by the running application
pub type Notes = NotesService<GraphqlClient, HttpObjectStore>;
pub type Sessions = SessionService<AuthClient>;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub config: PlatformConfig,
    pub notes: Arc<Notes>,
    pub session: Arc<Sessions>,
}

impl AppState {
    /// Build the full service graph for a platform configuration
    pub fn new(config: PlatformConfig) -> Result<Self> {
        let http = api::build_http_client()?;
        let sessions = new_session_store();

        let gateway = GraphqlClient::new(
            http.clone(),
            config.api_url.clone(),
            config.api_key.clone(),
            sessions.clone(),
        );
        let store = HttpObjectStore::new(
            http.clone(),
            config.storage_url.clone(),
            config.api_key.clone(),
            sessions.clone(),
        );
        let auth = AuthClient::new(http, config.auth_url.clone());

        Ok(Self {
            notes: Arc::new(NotesService::new(gateway, store)),
            session: Arc::new(SessionService::new(auth, sessions)),
            config,
        })
    }
}

/// Application setup - called once on startup
pub fn setup(app: &mut App) -> Result<()> {
    tracing::info!("Initializing application");

    let config_dir = app.path().app_config_dir()?;
    std::fs::create_dir_all(&config_dir)?;

    let config = PlatformConfig::load(&config_dir)?;
    tracing::info!("Platform API endpoint: {}", config.api_url);

    let state = AppState::new(config)?;
    app.manage(state);

    tracing::info!("Application initialized successfully");

    Ok(())
}
