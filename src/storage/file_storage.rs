use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::error_handling::types::StorageError;
use crate::storage::storage_trait::KeyValueSlot;
use crate::storage::types::is_valid_slot_name;

/// Filesystem-backed key-value slots: one `<slot>.json` file per slot.
pub struct FileSlot {
    base_path: PathBuf,
}

impl FileSlot {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, StorageError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).map_err(|e| {
            error!("Failed to create slot dir {}: {}", base_path.display(), e);
            StorageError::WriteFailed
        })?;
        info!("FileSlot initialized at {}", base_path.display());
        Ok(Self { base_path })
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_slot_name(slot) {
            error!("Rejected slot name {:?}", slot);
            return Err(StorageError::WriteFailed);
        }
        Ok(self.base_path.join(format!("{}.json", slot)))
    }
}

impl KeyValueSlot for FileSlot {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(slot).map_err(|_| StorageError::ReadFailed)?;
        if !path.exists() {
            debug!("Slot {} has no snapshot at {}", slot, path.display());
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| {
            error!("Failed to read slot file {}: {}", path.display(), e);
            StorageError::ReadFailed
        })?;
        debug!("Read {} byte(s) from {}", content.len(), path.display());
        Ok(Some(content))
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot)?;
        // write-then-rename so a crash never leaves a truncated snapshot
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| {
            error!("Failed to write slot file {}: {}", tmp.display(), e);
            StorageError::WriteFailed
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            error!("Failed to replace slot file {}: {}", path.display(), e);
            StorageError::WriteFailed
        })?;
        debug!("Wrote {} byte(s) to {}", value.len(), path.display());
        Ok(())
    }
}
