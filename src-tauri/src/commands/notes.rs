//! Note-related commands
//!
//! List, draft form, create and delete operations.

use crate::api::models::{DraftNote, Note};
use crate::app::AppState;
use crate::error::Result;
use tauri::State;

/// Fetch all notes from the platform, replacing the local list
#[tauri::command]
pub async fn list_notes(state: State<'_, AppState>) -> Result<Vec<Note>> {
    state.notes.refresh().await
}

/// Get the locally cached note list without a remote call
#[tauri::command]
pub async fn get_notes(state: State<'_, AppState>) -> Result<Vec<Note>> {
    Ok(state.notes.notes().await)
}

/// Update the draft form's text fields
#[tauri::command]
pub async fn set_draft(
    state: State<'_, AppState>,
    name: String,
    description: String,
) -> Result<()> {
    state.notes.set_draft(name, description).await;
    Ok(())
}

/// Get the current draft form
#[tauri::command]
pub async fn get_draft(state: State<'_, AppState>) -> Result<DraftNote> {
    Ok(state.notes.draft().await)
}

/// Submit the draft as a new note
#[tauri::command]
pub async fn create_note(state: State<'_, AppState>) -> Result<Note> {
    state.notes.create_note().await
}

/// Delete a note by id
#[tauri::command]
pub async fn delete_note(state: State<'_, AppState>, id: String) -> Result<()> {
    state.notes.delete_note(&id).await
}
