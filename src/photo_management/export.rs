use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::error_handling::types::StoreError;

/// File name offered for downloaded backups.
pub const EXPORT_FILE_NAME: &str = "ky-niem-cua-chung-minh.json";

/// A serialized copy of the whole collection, ready to be downloaded.
///
/// The contents are the same JSON array format `PhotoStore::import_data`
/// accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: &'static str,
    pub contents: String,
}

impl ExportDocument {
    pub fn new(contents: String) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME,
            contents,
        }
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }

    /// Writes the document into `dir` under its fixed file name.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, StoreError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| {
            error!("Failed to create export dir {}: {}", dir.display(), e);
            StoreError::ExportFailed(e.to_string())
        })?;
        let path = dir.join(self.file_name);
        fs::write(&path, &self.contents).map_err(|e| {
            error!("Failed to write export {}: {}", path.display(), e);
            StoreError::ExportFailed(e.to_string())
        })?;
        info!("Exported {} byte(s) to {}", self.contents.len(), path.display());
        Ok(path)
    }
}
