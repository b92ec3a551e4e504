use std::sync::{Arc, Mutex, MutexGuard};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Datelike, Utc};
use log::{debug, error, info};
use uuid::Uuid;

use super::types::{ApiFailure, UploadBody};
use crate::error_handling::types::ObjectStoreError;
use crate::notification::feed::NotificationFeed;
use crate::notification::notifier::Notification;
use crate::photo_management::export::ExportDocument;
use crate::photo_management::photo::{PhotoPatch, PhotoRecord};
use crate::photo_management::photo_store::PhotoStore;
use crate::storage::storage_trait::ObjectStore;
use crate::upload::storage_key::content_type_for;
use crate::upload::upload_flow::{UploadFlow, UploadRequest};

/// Shared state behind every route.
///
/// Store and object store calls may block (the SQLite slot drives its own
/// runtime), so each one runs on the blocking pool.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<PhotoStore>>,
    pub upload: Arc<UploadFlow>,
    pub objects: Arc<dyn ObjectStore>,
    pub feed: Arc<NotificationFeed>,
    pub bucket: String,
}

pub(crate) fn lock_store(store: &Mutex<PhotoStore>) -> MutexGuard<'_, PhotoStore> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn blocking<T, F>(task: F) -> Result<T, ApiFailure>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiFailure> + Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|e| {
        error!("Blocking task failed: {}", e);
        ApiFailure::internal("Internal error")
    })?
}

fn parse_id(id: &str) -> Result<Uuid, ApiFailure> {
    Uuid::parse_str(id).map_err(|_| ApiFailure::bad_request("Invalid photo id"))
}

fn photo_not_found(id: Uuid) -> ApiFailure {
    ApiFailure::not_found(format!("No photo with id {}", id))
}

impl AppState {
    /// Gallery view, newest first, optionally filtered by year.
    pub async fn list_photos(&self, year: Option<i32>) -> Result<Vec<PhotoRecord>, ApiFailure> {
        let store = self.store.clone();
        blocking(move || {
            let store = lock_store(&store);
            let photos: Vec<PhotoRecord> = store.gallery(year).into_iter().cloned().collect();
            Ok(photos)
        })
        .await
    }

    pub async fn get_photo(&self, id: &str) -> Result<PhotoRecord, ApiFailure> {
        let id = parse_id(id)?;
        let store = self.store.clone();
        blocking(move || {
            lock_store(&store)
                .get_photo(id)
                .cloned()
                .ok_or_else(|| photo_not_found(id))
        })
        .await
    }

    pub async fn special_photos(&self) -> Result<Vec<PhotoRecord>, ApiFailure> {
        let store = self.store.clone();
        blocking(move || {
            let store = lock_store(&store);
            let photos: Vec<PhotoRecord> = store.get_special_photos().into_iter().cloned().collect();
            Ok(photos)
        })
        .await
    }

    pub async fn years(&self) -> Result<Vec<i32>, ApiFailure> {
        let store = self.store.clone();
        blocking(move || Ok(lock_store(&store).get_years())).await
    }

    /// Decodes the form body and runs it through the upload pipeline.
    pub async fn upload(&self, body: UploadBody) -> Result<PhotoRecord, ApiFailure> {
        let bytes = STANDARD
            .decode(body.image_base64.trim())
            .map_err(|_| ApiFailure::bad_request("imageBase64 is not valid base64"))?;
        let request = UploadRequest {
            file_name: body.file_name,
            bytes,
            description: body.description,
            year: body.year.unwrap_or_else(|| Utc::now().year()),
            is_special: body.is_special,
        };
        debug!(
            "Upload request for {} ({} byte(s))",
            request.file_name,
            request.bytes.len()
        );

        let store = self.store.clone();
        let upload = self.upload.clone();
        blocking(move || upload.submit(request, &store).map_err(ApiFailure::from)).await
    }

    pub async fn update_photo(&self, id: &str, patch: PhotoPatch) -> Result<PhotoRecord, ApiFailure> {
        let id = parse_id(id)?;
        let store = self.store.clone();
        blocking(move || {
            lock_store(&store)
                .update_photo(id, &patch)?
                .ok_or_else(|| photo_not_found(id))
        })
        .await
    }

    pub async fn toggle_special(&self, id: &str) -> Result<PhotoRecord, ApiFailure> {
        let id = parse_id(id)?;
        let store = self.store.clone();
        blocking(move || {
            lock_store(&store)
                .toggle_special(id)?
                .ok_or_else(|| photo_not_found(id))
        })
        .await
    }

    pub async fn delete_photo(&self, id: &str) -> Result<(), ApiFailure> {
        let id = parse_id(id)?;
        let store = self.store.clone();
        blocking(move || {
            if lock_store(&store).delete_photo(id)? {
                Ok(())
            } else {
                Err(photo_not_found(id))
            }
        })
        .await
    }

    pub async fn export(&self) -> Result<ExportDocument, ApiFailure> {
        let store = self.store.clone();
        blocking(move || Ok(lock_store(&store).export_data()?)).await
    }

    /// Replaces the whole collection with an exported document.
    pub async fn import(&self, body: Vec<u8>) -> Result<usize, ApiFailure> {
        let text = String::from_utf8(body)
            .map_err(|_| ApiFailure::bad_request("Import file is not UTF-8 text"))?;
        let store = self.store.clone();
        let imported = blocking(move || Ok(lock_store(&store).import_data(&text)?)).await?;
        info!("Imported {} photo(s) over HTTP", imported);
        Ok(imported)
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.feed.recent()
    }

    /// Raw object bytes plus their guessed content type.
    pub async fn fetch_object(&self, key: &str) -> Result<(Vec<u8>, String), ApiFailure> {
        let objects = self.objects.clone();
        let key = key.to_string();
        blocking(move || match objects.fetch(&key) {
            Ok(bytes) => Ok((bytes, content_type_for(&key))),
            Err(ObjectStoreError::NotFound(_)) | Err(ObjectStoreError::InvalidKey(_)) => {
                Err(ApiFailure::not_found(format!("No object {}", key)))
            }
            Err(e) => {
                error!("Failed to read object {}: {}", key, e);
                Err(ApiFailure::internal(e.to_string()))
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::notifier::Severity;
    use crate::storage::file_storage::FileSlot;
    use crate::storage::object_storage::FileObjectStore;
    use tempfile::TempDir;
    use tokio_test::{assert_err, assert_ok};
    use warp::http::StatusCode;

    fn state(dir: &TempDir) -> AppState {
        let feed = Arc::new(NotificationFeed::new(10));
        let slots = Arc::new(FileSlot::new(dir.path()).unwrap());
        let objects: Arc<dyn ObjectStore> = Arc::new(
            FileObjectStore::new(dir.path(), "uploads", "http://127.0.0.1:8080").unwrap(),
        );
        let mut store = PhotoStore::new(slots, "photos", feed.clone());
        store.load().unwrap();
        AppState {
            store: Arc::new(Mutex::new(store)),
            upload: Arc::new(UploadFlow::new(objects.clone(), feed.clone())),
            objects,
            feed,
            bucket: "uploads".into(),
        }
    }

    fn body(description: &str) -> UploadBody {
        UploadBody {
            file_name: format!("{}.jpg", description),
            image_base64: STANDARD.encode(b"\xff\xd8jpeg"),
            description: description.into(),
            year: Some(2023),
            is_special: false,
        }
    }

    #[tokio::test]
    async fn test_upload_then_fetch_object() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);

        let record = assert_ok!(state.upload(body("At the beach")).await);
        assert_eq!(record.year(), 2023);
        assert!(record.url().starts_with("http://127.0.0.1:8080/uploads/"));

        let key = record.url().rsplit('/').next().unwrap().to_string();
        let (bytes, content_type) = assert_ok!(state.fetch_object(&key).await);
        assert_eq!(bytes, b"\xff\xd8jpeg");
        assert_eq!(content_type, "image/jpeg");

        let listed = state.list_photos(Some(2023)).await.unwrap();
        assert_eq!(listed, vec![record]);
        assert_eq!(state.years().await.unwrap(), vec![2023]);

        let notes = state.notifications();
        assert_eq!(notes.last().unwrap().severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_upload_rejects_bad_input() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);

        let mut bad = body("x");
        bad.image_base64 = "not base64!".into();
        assert_eq!(
            state.upload(bad).await.unwrap_err().status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            state.upload(body("   ")).await.unwrap_err().status,
            StatusCode::BAD_REQUEST
        );
        assert!(state.list_photos(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_and_malformed_ids() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);
        let unknown = Uuid::new_v4().to_string();

        let failure = assert_err!(state.get_photo("nope").await);
        assert_eq!(failure.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            state.delete_photo(&unknown).await.unwrap_err().status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            state.toggle_special(&unknown).await.unwrap_err().status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            state.fetch_object("../photos.json").await.unwrap_err().status,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_update_toggle_delete() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);
        let record = state.upload(body("First trip")).await.unwrap();
        let id = record.id().to_string();

        let patch = PhotoPatch {
            description: Some("Our first trip".into()),
            ..PhotoPatch::default()
        };
        let updated = state.update_photo(&id, patch).await.unwrap();
        assert_eq!(updated.description(), "Our first trip");
        assert_eq!(updated.url(), record.url());

        assert!(state.toggle_special(&id).await.unwrap().is_special());
        assert_eq!(state.special_photos().await.unwrap().len(), 1);

        state.delete_photo(&id).await.unwrap();
        assert!(state.list_photos(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_import_over_http_state() {
        let dir = TempDir::new().unwrap();
        let state = state(&dir);
        state.upload(body("Keep me")).await.unwrap();

        let doc = state.export().await.unwrap();
        state.upload(body("Drop me")).await.unwrap();
        assert_eq!(state.list_photos(None).await.unwrap().len(), 2);

        let imported = state.import(doc.contents.into_bytes()).await.unwrap();
        assert_eq!(imported, 1);
        let photos = state.list_photos(None).await.unwrap();
        assert_eq!(photos[0].description(), "Keep me");

        assert_eq!(
            state.import(b"{\"not\":\"a list\"}".to_vec()).await.unwrap_err().status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(state.list_photos(None).await.unwrap().len(), 1);
    }
}
