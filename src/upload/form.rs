use std::sync::Mutex;

use chrono::{Datelike, Utc};
use log::debug;

use crate::error_handling::types::UploadError;
use crate::photo_management::photo::PhotoRecord;
use crate::photo_management::photo_store::PhotoStore;
use crate::upload::storage_key::preview_data_uri;
use crate::upload::upload_flow::{UploadFlow, UploadRequest};

/// An image picked by the user, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Transient state of the "add a memory" input surface.
///
/// The preview is a local `data:` URI for immediate feedback. It is never
/// handed to the store: records always point at the uploaded object.
#[derive(Debug, Clone)]
pub struct UploadForm {
    is_open: bool,
    selected: Option<SelectedImage>,
    preview: Option<String>,
    pub description: String,
    pub year: i32,
    pub is_special: bool,
    is_uploading: bool,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadForm {
    pub fn new() -> Self {
        Self {
            is_open: false,
            selected: None,
            preview: None,
            description: String::new(),
            year: Utc::now().year(),
            is_special: false,
            is_uploading: false,
        }
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Closing is refused while an upload is running.
    pub fn close(&mut self) -> bool {
        if self.is_uploading {
            return false;
        }
        self.is_open = false;
        true
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    pub fn select_image(&mut self, file_name: impl Into<String>, bytes: Vec<u8>) {
        let file_name = file_name.into();
        self.preview = Some(preview_data_uri(&file_name, &bytes));
        debug!("Selected {} ({} byte(s))", file_name, bytes.len());
        self.selected = Some(SelectedImage { file_name, bytes });
    }

    pub fn clear_image(&mut self) {
        self.selected = None;
        self.preview = None;
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// Mirrors the submit button: an image and a description, and no upload
    /// already running.
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.description.trim().is_empty() && !self.is_uploading
    }

    pub fn reset(&mut self) {
        self.selected = None;
        self.preview = None;
        self.description.clear();
        self.year = Utc::now().year();
        self.is_special = false;
        self.is_uploading = false;
    }

    fn to_request(&self) -> Result<UploadRequest, UploadError> {
        let image = self.selected.as_ref().ok_or(UploadError::MissingImage)?;
        let request = UploadRequest {
            file_name: image.file_name.clone(),
            bytes: image.bytes.clone(),
            description: self.description.clone(),
            year: self.year,
            is_special: self.is_special,
        };
        request.validate()?;
        Ok(request)
    }

    /// Runs the upload flow. On success the form is reset and closed; on
    /// failure the entered values are kept so the user can retry.
    pub fn submit(
        &mut self,
        flow: &UploadFlow,
        store: &Mutex<PhotoStore>,
    ) -> Result<PhotoRecord, UploadError> {
        if self.is_uploading {
            return Err(UploadError::AlreadyInProgress);
        }
        let request = self.to_request()?;
        self.is_uploading = true;
        let result = flow.submit(request, store);
        self.is_uploading = false;

        if result.is_ok() {
            self.reset();
            self.is_open = false;
        }
        result
    }
}
