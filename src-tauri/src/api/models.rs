//! Notes data models
//!
//! Wire types mirror the platform's GraphQL schema (camelCase fields,
//! server-assigned id and createdAt). The view model carries images as
//! resolved URLs so the frontend never sees a raw object key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note as returned by the platform's query endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Object store key of the attached image, if any
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Input variables for the create-note mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// An image attachment resolved for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteImage {
    /// Key of the object in the platform's object store
    pub key: String,
    /// Fetchable URL resolved from the key
    pub url: String,
}

/// A note as rendered by the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: Option<NoteImage>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Transient input state for a not-yet-submitted note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftNote {
    pub name: String,
    pub description: String,
    /// Object store key recorded by a completed image upload
    pub image: Option<String>,
}

impl DraftNote {
    /// Convert the draft into mutation input
    pub fn to_input(&self) -> NoteInput {
        NoteInput {
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
        }
    }
}
