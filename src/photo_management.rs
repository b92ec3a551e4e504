//! Photo management core module.
//!
//! This module owns the photo collection: the record types, the store that
//! mutates and persists them, and the export document used for backups.

/// Submodule for the backup document format.
pub mod export;
/// Submodule for record, creation input and partial update types.
pub mod photo;
/// Submodule for the photo store implementation.
pub mod photo_store;

pub use export::{ExportDocument, EXPORT_FILE_NAME};
pub use photo::{NewPhoto, PhotoPatch, PhotoRecord};
pub use photo_store::PhotoStore;
