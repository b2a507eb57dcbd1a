//! GraphQL transport for the platform's query/mutation endpoint
//!
//! The schema and transport are owned by the platform; this module supplies
//! operation documents and input variables, nothing more. Operation
//! documents mirror the platform's generated client documents.

use crate::api::auth::{authorize_request, SessionStore};
use crate::api::models::{NoteInput, NoteRecord};
use crate::error::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::future::Future;
use uuid::Uuid;

// ===== Operation Documents =====

pub const LIST_NOTES: &str = "\
query ListNotes {
  listNotes {
    items {
      id
      name
      description
      image
      createdAt
    }
  }
}";

pub const CREATE_NOTE: &str = "\
mutation CreateNote($input: CreateNoteInput!) {
  createNote(input: $input) {
    id
    name
    description
    image
    createdAt
  }
}";

pub const DELETE_NOTE: &str = "\
mutation DeleteNote($input: DeleteNoteInput!) {
  deleteNote(input: $input) {
    id
  }
}";

// ===== Request/Response Envelope =====

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

/// A single error entry from a GraphQL error payload
#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// Surface GraphQL-level errors and unwrap the data payload
fn unwrap_envelope<T>(operation: &str, envelope: GraphqlResponse<T>) -> Result<T> {
    if !envelope.errors.is_empty() {
        let messages = envelope
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(AppError::Api(messages));
    }

    envelope
        .data
        .ok_or_else(|| AppError::Api(format!("{} returned no data", operation)))
}

// ===== Response Data Shapes =====

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListNotesData {
    list_notes: NotePage,
}

#[derive(Debug, Deserialize)]
struct NotePage {
    items: Vec<NoteRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateNoteData {
    create_note: NoteRecord,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteNoteData {
    delete_note: DeletedNote,
}

#[derive(Debug, Deserialize)]
struct DeletedNote {
    id: String,
}

// ===== Gateway =====

/// Seam between the view-state service and the wire
pub trait NotesGateway: Send + Sync {
    fn list_notes(&self) -> impl Future<Output = Result<Vec<NoteRecord>>> + Send;

    fn create_note(&self, input: NoteInput) -> impl Future<Output = Result<NoteRecord>> + Send;

    fn delete_note(&self, id: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Client for the platform's GraphQL endpoint
#[derive(Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    sessions: SessionStore,
}

impl GraphqlClient {
    pub fn new(
        http: reqwest::Client,
        endpoint: String,
        api_key: Option<String>,
        sessions: SessionStore,
    ) -> Self {
        Self {
            http,
            endpoint,
            api_key,
            sessions,
        }
    }

    /// Execute one operation against the endpoint
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &'static str,
        variables: Option<serde_json::Value>,
    ) -> Result<T> {
        let request_id = Uuid::new_v4();
        tracing::debug!("GraphQL {} (request: {})", operation, request_id);

        let req = self
            .http
            .post(&self.endpoint)
            .header("x-request-id", request_id.to_string())
            .json(&GraphqlRequest { query, variables });
        let req = authorize_request(req, &self.sessions, self.api_key.as_deref()).await?;

        let response = req.send().await?.error_for_status()?;
        let envelope: GraphqlResponse<T> = response.json().await?;

        unwrap_envelope(operation, envelope)
    }
}

impl NotesGateway for GraphqlClient {
    async fn list_notes(&self) -> Result<Vec<NoteRecord>> {
        let data: ListNotesData = self.execute("ListNotes", LIST_NOTES, None).await?;
        Ok(data.list_notes.items)
    }

    async fn create_note(&self, input: NoteInput) -> Result<NoteRecord> {
        let data: CreateNoteData = self
            .execute("CreateNote", CREATE_NOTE, Some(json!({ "input": input })))
            .await?;
        Ok(data.create_note)
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        let data: DeleteNoteData = self
            .execute("DeleteNote", DELETE_NOTE, Some(json!({ "input": { "id": id } })))
            .await?;

        tracing::debug!("Platform confirmed delete of note: {}", data.delete_note.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_parses() {
        let envelope: GraphqlResponse<ListNotesData> = serde_json::from_str(
            r#"{
                "data": {
                    "listNotes": {
                        "items": [
                            { "id": "note-1", "name": "Groceries", "description": "Milk, eggs" },
                            { "id": "note-2", "name": "Todo", "description": "Fix bug", "image": "cat.png" }
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        let data = unwrap_envelope("ListNotes", envelope).unwrap();

        assert_eq!(data.list_notes.items.len(), 2);
        assert_eq!(data.list_notes.items[1].image.as_deref(), Some("cat.png"));
    }

    #[test]
    fn test_graphql_errors_are_surfaced() {
        let envelope: GraphqlResponse<ListNotesData> = serde_json::from_str(
            r#"{
                "data": null,
                "errors": [
                    { "message": "Not Authorized to access listNotes" },
                    { "message": "Request rejected" }
                ]
            }"#,
        )
        .unwrap();

        let result = unwrap_envelope("ListNotes", envelope);

        match result {
            Err(AppError::Api(message)) => {
                assert!(message.contains("Not Authorized"));
                assert!(message.contains("Request rejected"));
            }
            other => panic!("expected API error, got: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_data_is_an_error() {
        let envelope: GraphqlResponse<CreateNoteData> =
            serde_json::from_str(r#"{ "data": null }"#).unwrap();

        let result = unwrap_envelope("CreateNote", envelope);

        assert!(matches!(result, Err(AppError::Api(_))));
    }

    #[test]
    fn test_create_variables_shape() {
        let input = NoteInput {
            name: "Groceries".to_string(),
            description: "Milk, eggs".to_string(),
            image: None,
        };

        let variables = json!({ "input": input });

        assert_eq!(
            variables,
            json!({ "input": { "name": "Groceries", "description": "Milk, eggs" } })
        );
    }
}
