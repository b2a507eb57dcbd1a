//! Remote object store client
//!
//! Note images live in the platform's managed object store, keyed by file
//! name. Uploading an existing key replaces the stored object. Keys are
//! resolved to fetchable (signed) URLs at read time; the raw key is never
//! handed to the frontend.

use crate::api::auth::{authorize_request, SessionStore};
use crate::error::{AppError, Result};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::future::Future;

/// Seam between the view-state service and the platform's object store
pub trait ObjectStore: Send + Sync {
    /// Store bytes under a key, replacing any existing object
    fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Resolve a key to a fetchable URL
    fn object_url(&self, key: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Client for the platform's object store endpoint
#[derive(Clone)]
pub struct HttpObjectStore {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    sessions: SessionStore,
}

#[derive(Deserialize)]
struct ObjectUrlResponse {
    url: String,
}

impl HttpObjectStore {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        api_key: Option<String>,
        sessions: SessionStore,
    ) -> Self {
        Self {
            http,
            base_url,
            api_key,
            sessions,
        }
    }
}

impl ObjectStore for HttpObjectStore {
    async fn put_object(&self, key: &str, data: &[u8], content_type: &str) -> Result<()> {
        let req = self
            .http
            .put(format!("{}/objects/{}", self.base_url, key))
            .header("content-type", content_type.to_string())
            .header("x-content-sha256", content_checksum(data))
            .body(data.to_vec());
        let req = authorize_request(req, &self.sessions, self.api_key.as_deref()).await?;

        let response = req.send().await?;
        if !response.status().is_success() {
            return Err(AppError::ObjectStore(format!(
                "upload of {} failed with status {}",
                key,
                response.status()
            )));
        }

        tracing::debug!("Stored object: {} ({} bytes)", key, data.len());

        Ok(())
    }

    async fn object_url(&self, key: &str) -> Result<String> {
        let req = self.http.get(format!("{}/objects/{}/url", self.base_url, key));
        let req = authorize_request(req, &self.sessions, self.api_key.as_deref()).await?;

        let response = req.send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::ObjectStore(format!("object not found: {}", key)));
        }

        let resolved: ObjectUrlResponse = response.error_for_status()?.json().await?;

        Ok(resolved.url)
    }
}

/// SHA-256 checksum of the payload, sent as an integrity header on uploads
fn content_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Sanitize a file name into an object key (prevents path traversal)
pub fn sanitize_object_key(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| *c != '/' && *c != '\\' && *c != '\0')
        .take(255)
        .collect()
}
