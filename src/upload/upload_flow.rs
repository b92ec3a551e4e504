use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use log::{debug, error, info, warn};

use crate::error_handling::types::UploadError;
use crate::notification::notifier::{Notification, Notifier};
use crate::photo_management::photo::{NewPhoto, PhotoRecord};
use crate::photo_management::photo_store::PhotoStore;
use crate::storage::storage_trait::ObjectStore;
use crate::upload::storage_key::{content_type_for, derive_storage_key};

/// Everything needed to turn a selected image into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub description: String,
    pub year: i32,
    pub is_special: bool,
}

impl UploadRequest {
    /// Local checks run before touching the object store.
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.file_name.trim().is_empty() || self.bytes.is_empty() {
            return Err(UploadError::MissingImage);
        }
        if self.description.trim().is_empty() {
            return Err(UploadError::MissingDescription);
        }
        Ok(())
    }
}

/// Upload pipeline: object store first, then the photo store.
///
/// At most one submission runs at a time; a concurrent one is rejected with
/// `UploadError::AlreadyInProgress`.
pub struct UploadFlow {
    object_store: Arc<dyn ObjectStore>,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
}

pub(crate) struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl UploadFlow {
    pub fn new(object_store: Arc<dyn ObjectStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            object_store,
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub(crate) fn begin(&self) -> Result<InFlightGuard<'_>, UploadError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlightGuard(&self.in_flight))
            .map_err(|_| UploadError::AlreadyInProgress)
    }

    /// Uploads the image, resolves its public URL and appends the record.
    ///
    /// The store lock is only taken for the final append. Any failure before
    /// that point leaves the store untouched.
    pub fn submit(
        &self,
        request: UploadRequest,
        store: &Mutex<PhotoStore>,
    ) -> Result<PhotoRecord, UploadError> {
        request.validate()?;
        let _guard = self.begin().map_err(|e| {
            warn!("Rejected upload of {}: {}", request.file_name, e);
            e
        })?;

        let key = derive_storage_key(&request.file_name, Utc::now());
        let content_type = content_type_for(&request.file_name);
        debug!("Uploading {} as {} ({})", request.file_name, key, content_type);

        if let Err(e) = self
            .object_store
            .upload(&key, &request.bytes, &content_type)
        {
            error!("Upload of {} failed: {}", key, e);
            self.notifier
                .notify(Notification::error("Error", "Upload failed!"));
            return Err(e.into());
        }

        let Some(url) = self.object_store.public_url(&key) else {
            error!("No public URL for uploaded object {}", key);
            self.notifier.notify(Notification::error(
                "Error",
                "Unable to get a link for the uploaded image.",
            ));
            return Err(UploadError::PublicUrlUnavailable(key));
        };

        let record = {
            let mut store = store.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            store.add_photo(NewPhoto {
                url,
                description: request.description,
                year: request.year,
                is_special: request.is_special,
                date: Some(Utc::now()),
            })?
        };

        info!("Uploaded {} as photo {}", key, record.id());
        self.notifier
            .notify(Notification::success("Success!", "The memory has been saved."));
        Ok(record)
    }
}
