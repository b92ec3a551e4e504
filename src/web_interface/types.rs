use serde::{Deserialize, Serialize};
use warp::http::StatusCode;

use crate::error_handling::types::{StoreError, UploadError};

/// API error payload
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub message: String,
}

/// A failed API call: HTTP status plus a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub message: String,
}

impl ApiFailure {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn body(&self) -> ApiError {
        ApiError {
            message: self.message.clone(),
        }
    }
}

impl From<StoreError> for ApiFailure {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ImportFailed(_) => ApiFailure::bad_request(err.to_string()),
            StoreError::NotLoaded => {
                ApiFailure::new(StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
            StoreError::LoadFailed(_)
            | StoreError::PersistFailed(_)
            | StoreError::ExportFailed(_) => ApiFailure::internal(err.to_string()),
        }
    }
}

impl From<UploadError> for ApiFailure {
    fn from(err: UploadError) -> Self {
        let status = match err {
            UploadError::MissingImage | UploadError::MissingDescription => StatusCode::BAD_REQUEST,
            UploadError::AlreadyInProgress => StatusCode::CONFLICT,
            UploadError::UploadFailed(_) | UploadError::PublicUrlUnavailable(_) => {
                StatusCode::BAD_GATEWAY
            }
            UploadError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiFailure::new(status, err.to_string())
    }
}

/// `GET /photos?year=2023`
#[derive(Debug, Default, Deserialize)]
pub struct GalleryQuery {
    pub year: Option<i32>,
}

/// `POST /photos` body: the upload form.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadBody {
    pub file_name: String,
    /// Image bytes, standard base64
    pub image_base64: String,
    pub description: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub is_special: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportResponse {
    pub imported: usize,
}
