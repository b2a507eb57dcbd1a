//! Delegated authentication
//!
//! Identity is owned by the platform's auth service: this module only
//! exchanges credentials for platform-issued tokens and keeps the resulting
//! session in a store shared by every platform client in the process.

use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Tokens issued by the platform's auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// An authenticated user session
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub tokens: AuthTokens,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    /// Value of the authorization header for this session
    pub fn authorization(&self) -> String {
        format!("{} {}", self.tokens.token_type, self.tokens.access_token)
    }
}

/// Session state shared by every platform client in the process
pub type SessionStore = Arc<RwLock<Option<Session>>>;

pub fn new_session_store() -> SessionStore {
    Arc::new(RwLock::new(None))
}

/// Attach credentials to a platform request: the active session's bearer
/// token, or the configured API key when nobody is signed in.
pub async fn authorize_request(
    req: reqwest::RequestBuilder,
    sessions: &SessionStore,
    api_key: Option<&str>,
) -> Result<reqwest::RequestBuilder> {
    if let Some(session) = sessions.read().await.as_ref() {
        return Ok(req.header("authorization", session.authorization()));
    }

    if let Some(key) = api_key {
        return Ok(req.header("x-api-key", key));
    }

    Err(AppError::NotSignedIn)
}

/// Seam between the session service and the platform's auth endpoint
pub trait AuthProvider: Send + Sync {
    fn sign_in(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthTokens>> + Send;

    fn sign_out(&self, tokens: &AuthTokens) -> impl Future<Output = Result<()>> + Send;
}

/// Client for the platform's auth endpoint
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    auth_url: String,
}

impl AuthClient {
    pub fn new(http: reqwest::Client, auth_url: String) -> Self {
        Self { http, auth_url }
    }
}

impl AuthProvider for AuthClient {
    async fn sign_in(&self, username: &str, password: &str) -> Result<AuthTokens> {
        tracing::info!("Signing in user: {}", username);

        let response = self
            .http
            .post(format!("{}/sign-in", self.auth_url))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AppError::Auth("invalid username or password".to_string()));
        }

        let tokens: AuthTokens = response.error_for_status()?.json().await?;

        tracing::info!("User signed in: {}", username);

        Ok(tokens)
    }

    /// Revoke the session's tokens at the platform
    async fn sign_out(&self, tokens: &AuthTokens) -> Result<()> {
        self.http
            .post(format!("{}/sign-out", self.auth_url))
            .header("authorization", format!("{} {}", tokens.token_type, tokens.access_token))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
