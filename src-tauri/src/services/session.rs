//! Session service
//!
//! Sign-in/sign-out lifecycle. Authentication itself is delegated to the
//! platform; this service exchanges credentials for platform-issued tokens
//! and keeps the resulting session available to the other platform clients
//! through the shared session store.

use crate::api::auth::{AuthProvider, Session, SessionStore};
use crate::error::{AppError, Result};
use chrono::Utc;

/// Service managing the signed-in user session
pub struct SessionService<A> {
    auth: A,
    sessions: SessionStore,
}

impl<A: AuthProvider> SessionService<A> {
    pub fn new(auth: A, sessions: SessionStore) -> Self {
        Self { auth, sessions }
    }

    /// Sign in with platform credentials and activate the session
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<Session> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "username and password are required".to_string(),
            ));
        }

        let tokens = self.auth.sign_in(username, password).await?;

        let session = Session {
            username: username.to_string(),
            tokens,
            signed_in_at: Utc::now(),
        };
        *self.sessions.write().await = Some(session.clone());

        Ok(session)
    }

    /// Sign out, clearing the local session even when remote revocation
    /// fails.
    pub async fn sign_out(&self) -> Result<()> {
        let session = self.sessions.write().await.take();

        if let Some(session) = session {
            if let Err(e) = self.auth.sign_out(&session.tokens).await {
                tracing::warn!("Token revocation failed, session cleared locally: {}", e);
            }
            tracing::info!("User signed out: {}", session.username);
        }

        Ok(())
    }

    /// Name of the currently signed-in user, if any
    pub async fn current_user(&self) -> Option<String> {
        self.sessions.read().await.as_ref().map(|s| s.username.clone())
    }
}
