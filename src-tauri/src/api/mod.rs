//! Platform API module
//!
//! Everything that talks to the managed backend platform lives here:
//! - `models`: wire and view types for notes
//! - `graphql`: the query/mutation transport and the notes gateway
//! - `auth`: delegated authentication and the shared session

pub mod auth;
pub mod graphql;
pub mod models;

pub use auth::{AuthClient, AuthProvider, Session, SessionStore};
pub use graphql::{GraphqlClient, NotesGateway};
pub use models::*;

use crate::config;
use crate::error::Result;
use std::time::Duration;

/// Build the HTTP client shared by every platform call.
///
/// One client per process: connection pooling, the request timeout, and the
/// versioned user agent are configured once here.
pub fn build_http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(config::USER_AGENT)
        .timeout(Duration::from_secs(config::REQUEST_TIMEOUT_SECS))
        .build()?;

    Ok(client)
}
