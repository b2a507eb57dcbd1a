//! Notes service
//!
//! Owns the view state (note list cache and draft form) and implements the
//! note operations against the platform gateway and object store. The list
//! is derived state: every mutation ends with a wholesale refresh from the
//! platform, so the cache cannot drift from the remote store.

use crate::api::graphql::NotesGateway;
use crate::api::models::{DraftNote, Note, NoteImage, NoteRecord};
use crate::config;
use crate::error::{AppError, Result};
use crate::storage::object_store::sanitize_object_key;
use crate::storage::ObjectStore;
use tokio::sync::RwLock;

/// View state owned by the single screen
#[derive(Debug, Default)]
struct ViewState {
    notes: Vec<Note>,
    draft: DraftNote,
}

/// Service for managing notes against the platform
pub struct NotesService<G, S> {
    gateway: G,
    store: S,
    state: RwLock<ViewState>,
}

impl<G: NotesGateway, S: ObjectStore> NotesService<G, S> {
    pub fn new(gateway: G, store: S) -> Self {
        Self {
            gateway,
            store,
            state: RwLock::new(ViewState::default()),
        }
    }

    /// Snapshot of the current note list, without a remote call
    pub async fn notes(&self) -> Vec<Note> {
        self.state.read().await.notes.clone()
    }

    /// Snapshot of the current draft form
    pub async fn draft(&self) -> DraftNote {
        self.state.read().await.draft.clone()
    }

    /// Update the draft's text fields, keeping any attached image key
    pub async fn set_draft(&self, name: String, description: String) {
        let mut state = self.state.write().await;
        state.draft.name = name;
        state.draft.description = description;
    }

    /// Re-derive the note list from the platform.
    ///
    /// Every record passes through [`resolve`](Self::resolve) before it
    /// enters view state, so the list and create paths render identically.
    pub async fn refresh(&self) -> Result<Vec<Note>> {
        let records = self.gateway.list_notes().await?;
        tracing::debug!("Fetched {} notes from platform", records.len());

        let mut notes = Vec::with_capacity(records.len());
        for record in records {
            notes.push(self.resolve(record).await?);
        }

        self.state.write().await.notes = notes.clone();

        Ok(notes)
    }

    /// Submit the draft as a new note.
    ///
    /// An empty name or description is rejected before any remote call and
    /// without touching local state. On success the draft resets to empty
    /// and the list is re-derived from the platform.
    pub async fn create_note(&self) -> Result<Note> {
        let draft = self.draft().await;

        if draft.name.trim().is_empty() {
            return Err(AppError::Validation("note name is required".to_string()));
        }
        if draft.description.trim().is_empty() {
            return Err(AppError::Validation(
                "note description is required".to_string(),
            ));
        }

        tracing::info!("Creating note: {}", draft.name);

        let record = self.gateway.create_note(draft.to_input()).await?;
        let created = self.resolve(record).await?;

        self.state.write().await.draft = DraftNote::default();

        self.refresh().await?;

        tracing::info!("Note created: {}", created.id);

        Ok(created)
    }

    /// Delete a note by id, then re-derive the list.
    ///
    /// The local list is only touched after the platform confirms, so a
    /// failed delete leaves the cache consistent with the remote store.
    pub async fn delete_note(&self, id: &str) -> Result<()> {
        tracing::info!("Deleting note: {}", id);

        self.gateway.delete_note(id).await?;
        self.refresh().await?;

        tracing::info!("Note deleted: {}", id);

        Ok(())
    }

    /// Store an image in the object store and record its key on the draft.
    ///
    /// Objects are keyed by sanitized file name; uploading the same name
    /// replaces the stored object. Ends with a full list refresh.
    pub async fn upload_image(
        &self,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String> {
        if filename.trim().is_empty() || data.is_empty() {
            return Err(AppError::Validation("no file selected".to_string()));
        }
        if data.len() > config::MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(format!(
                "image exceeds the {} MiB upload limit",
                config::MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        let key = sanitize_object_key(filename);
        tracing::info!("Uploading image: {} ({} bytes)", key, data.len());

        self.store.put_object(&key, data, content_type).await?;

        self.state.write().await.draft.image = Some(key.clone());

        self.refresh().await?;

        Ok(key)
    }

    /// Resolve a wire record into a view note, replacing the raw image key
    /// with a fetchable URL.
    async fn resolve(&self, record: NoteRecord) -> Result<Note> {
        let image = match record.image {
            Some(key) => {
                let url = self.store.object_url(&key).await?;
                Some(NoteImage { key, url })
            }
            None => None,
        };

        Ok(Note {
            id: record.id,
            name: record.name,
            description: record.description,
            image,
            created_at: record.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::NoteInput;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MockGateway {
        notes: Mutex<Vec<NoteRecord>>,
        calls: Mutex<Vec<String>>,
        last_input: Mutex<Option<NoteInput>>,
        fail_delete: AtomicBool,
    }

    impl MockGateway {
        fn seed(&self, records: Vec<NoteRecord>) {
            *self.notes.lock().unwrap() = records;
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }
    }

    impl NotesGateway for Arc<MockGateway> {
        async fn list_notes(&self) -> Result<Vec<NoteRecord>> {
            self.record("list_notes");
            Ok(self.notes.lock().unwrap().clone())
        }

        async fn create_note(&self, input: NoteInput) -> Result<NoteRecord> {
            self.record("create_note");
            *self.last_input.lock().unwrap() = Some(input.clone());

            let record = NoteRecord {
                id: format!("note-{}", self.notes.lock().unwrap().len() + 1),
                name: input.name,
                description: input.description,
                image: input.image,
                created_at: Some(Utc::now()),
            };
            self.notes.lock().unwrap().push(record.clone());

            Ok(record)
        }

        async fn delete_note(&self, id: &str) -> Result<()> {
            self.record("delete_note");

            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(AppError::Api("delete rejected".to_string()));
            }

            self.notes.lock().unwrap().retain(|n| n.id != id);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockStore {
        objects: Mutex<HashMap<String, Vec<u8>>>,
        puts: Mutex<Vec<String>>,
    }

    impl ObjectStore for Arc<MockStore> {
        async fn put_object(&self, key: &str, data: &[u8], _content_type: &str) -> Result<()> {
            self.puts.lock().unwrap().push(key.to_string());
            self.objects.lock().unwrap().insert(key.to_string(), data.to_vec());
            Ok(())
        }

        async fn object_url(&self, key: &str) -> Result<String> {
            Ok(format!("https://cdn.test/{}", key))
        }
    }

    type TestService = NotesService<Arc<MockGateway>, Arc<MockStore>>;

    fn create_test_service() -> (TestService, Arc<MockGateway>, Arc<MockStore>) {
        let gateway = Arc::new(MockGateway::default());
        let store = Arc::new(MockStore::default());
        let service = NotesService::new(gateway.clone(), store.clone());

        (service, gateway, store)
    }

    fn record(id: &str, name: &str, image: Option<&str>) -> NoteRecord {
        NoteRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{} description", name),
            image: image.map(str::to_string),
            created_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name_without_remote_call() {
        let (service, gateway, _store) = create_test_service();
        service.set_draft("".to_string(), "Milk, eggs".to_string()).await;

        let result = service.create_note().await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(gateway.calls().is_empty());
        assert!(service.notes().await.is_empty());
        // the rejected draft is kept for the user to fix
        assert_eq!(service.draft().await.description, "Milk, eggs");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_description_without_remote_call() {
        let (service, gateway, _store) = create_test_service();
        service.set_draft("Groceries".to_string(), "   ".to_string()).await;

        let result = service.create_note().await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_submits_draft_resets_form_and_refreshes() {
        let (service, gateway, _store) = create_test_service();
        service
            .set_draft("Groceries".to_string(), "Milk, eggs".to_string())
            .await;

        let created = service.create_note().await.unwrap();

        assert_eq!(created.name, "Groceries");
        assert_eq!(
            *gateway.last_input.lock().unwrap(),
            Some(NoteInput {
                name: "Groceries".to_string(),
                description: "Milk, eggs".to_string(),
                image: None,
            })
        );
        assert_eq!(service.draft().await, DraftNote::default());

        // the list is re-derived from the platform, not patched locally
        assert_eq!(gateway.calls(), vec!["create_note", "list_notes"]);
        let notes = service.notes().await;
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, created.id);
    }

    #[tokio::test]
    async fn test_delete_removes_note_from_derived_list() {
        let (service, gateway, _store) = create_test_service();
        gateway.seed(vec![record("note-1", "Keep", None), record("note-2", "Drop", None)]);
        service.refresh().await.unwrap();

        service.delete_note("note-2").await.unwrap();

        let notes = service.notes().await;
        assert_eq!(notes.len(), 1);
        assert!(notes.iter().all(|n| n.id != "note-2"));
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_list_untouched() {
        let (service, gateway, _store) = create_test_service();
        gateway.seed(vec![record("note-1", "Keep", None)]);
        service.refresh().await.unwrap();
        gateway.fail_delete.store(true, Ordering::SeqCst);

        let result = service.delete_note("note-1").await;

        assert!(matches!(result, Err(AppError::Api(_))));
        assert_eq!(service.notes().await.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_resolves_every_image_reference() {
        let (service, gateway, _store) = create_test_service();
        gateway.seed(vec![
            record("note-1", "Plain", None),
            record("note-2", "Cat", Some("cat.png")),
        ]);

        let notes = service.refresh().await.unwrap();

        assert!(notes[0].image.is_none());
        assert_eq!(
            notes[1].image,
            Some(NoteImage {
                key: "cat.png".to_string(),
                url: "https://cdn.test/cat.png".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_upload_records_key_on_draft_and_reloads_list() {
        let (service, gateway, store) = create_test_service();

        let key = service
            .upload_image("cat.png", b"png bytes", "image/png")
            .await
            .unwrap();

        assert_eq!(key, "cat.png");
        assert_eq!(service.draft().await.image.as_deref(), Some("cat.png"));
        assert_eq!(*store.puts.lock().unwrap(), vec!["cat.png"]);
        assert_eq!(
            store.objects.lock().unwrap().get("cat.png").unwrap(),
            b"png bytes"
        );
        assert_eq!(gateway.calls(), vec!["list_notes"]);
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_selection() {
        let (service, _gateway, store) = create_test_service();

        let result = service.upload_image("", b"", "image/png").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.puts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_image() {
        let (service, _gateway, store) = create_test_service();
        let data = vec![0u8; config::MAX_UPLOAD_BYTES + 1];

        let result = service.upload_image("huge.png", &data, "image/png").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(store.puts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_created_note_resolves_image_like_the_list_path() {
        let (service, _gateway, _store) = create_test_service();
        service
            .upload_image("cat.png", b"png bytes", "image/png")
            .await
            .unwrap();
        service
            .set_draft("Cat".to_string(), "A cat picture".to_string())
            .await;

        let created = service.create_note().await.unwrap();
        let listed = service
            .notes()
            .await
            .into_iter()
            .find(|n| n.id == created.id)
            .unwrap();

        assert_eq!(created.image, listed.image);
        assert_eq!(
            created.image.unwrap().url,
            "https://cdn.test/cat.png"
        );
    }
}
