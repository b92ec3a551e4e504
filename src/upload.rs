//! Upload workflow
//!
//! Turns a user-selected image into a persisted photo record:
//! - `storage_key`: object key derivation, content types and local previews.
//! - `upload_flow`: the upload → public URL → add pipeline.
//! - `form`: transient input state around a submission.

pub mod form;
pub mod storage_key;
pub mod upload_flow;

pub use form::{SelectedImage, UploadForm};
pub use upload_flow::{UploadFlow, UploadRequest};
