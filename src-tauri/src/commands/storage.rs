//! Image upload commands

use crate::app::AppState;
use crate::error::Result;
use tauri::State;

/// Store an image in the platform object store and attach it to the draft.
/// Returns the object key the image was stored under.
#[tauri::command]
pub async fn upload_image(
    state: State<'_, AppState>,
    filename: String,
    mime_type: String,
    data: Vec<u8>,
) -> Result<String> {
    state.notes.upload_image(&filename, &data, &mime_type).await
}
