use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::error_handling::types::{ObjectStoreError, StorageError};
use crate::storage::storage_trait::ObjectStore;
use crate::storage::types::{is_valid_object_key, is_valid_slot_name};

/// A bucket of uploaded objects kept as plain files on disk.
///
/// Public URLs have the form `<public_base_url>/<bucket>/<key>`; the web
/// interface serves that path straight from the bucket directory.
pub struct FileObjectStore {
    bucket_dir: PathBuf,
    bucket: String,
    public_base_url: String,
}

impl FileObjectStore {
    pub fn new<P: AsRef<Path>>(
        base_path: P,
        bucket: &str,
        public_base_url: &str,
    ) -> Result<Self, StorageError> {
        if !is_valid_slot_name(bucket) {
            error!("Rejected bucket name {:?}", bucket);
            return Err(StorageError::WriteFailed);
        }
        let bucket_dir = base_path.as_ref().join(bucket);
        fs::create_dir_all(&bucket_dir).map_err(|e| {
            error!("Failed to create bucket dir {}: {}", bucket_dir.display(), e);
            StorageError::WriteFailed
        })?;
        info!("FileObjectStore bucket {} at {}", bucket, bucket_dir.display());
        Ok(Self {
            bucket_dir,
            bucket: bucket.to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    fn object_path(&self, key: &str) -> Result<PathBuf, ObjectStoreError> {
        if !is_valid_object_key(key) {
            return Err(ObjectStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.bucket_dir.join(key))
    }
}

impl ObjectStore for FileObjectStore {
    fn upload(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), ObjectStoreError> {
        let path = self.object_path(key)?;
        if path.exists() {
            // keys are meant to be unique; never clobber an existing object
            return Err(ObjectStoreError::WriteFailed(format!(
                "object {} already exists",
                key
            )));
        }
        fs::write(&path, bytes).map_err(|e| {
            error!("Failed to write object {}: {}", path.display(), e);
            ObjectStoreError::WriteFailed(e.to_string())
        })?;
        debug!(
            "Stored {} byte(s) of {} as {}/{}",
            bytes.len(),
            content_type,
            self.bucket,
            key
        );
        Ok(())
    }

    fn public_url(&self, key: &str) -> Option<String> {
        let path = self.object_path(key).ok()?;
        if !path.is_file() {
            return None;
        }
        Some(format!("{}/{}/{}", self.public_base_url, self.bucket, key))
    }

    fn fetch(&self, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        let path = self.object_path(key)?;
        fs::read(&path).map_err(|e| {
            debug!("Object {} unreadable: {}", path.display(), e);
            ObjectStoreError::NotFound(key.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_upload_then_resolve_public_url() {
        let dir = TempDir::new().unwrap();
        let store = FileObjectStore::new(dir.path(), "uploads", "http://localhost:8080/").unwrap();
        store.upload("1_a.jpg", b"jpeg", "image/jpeg").unwrap();

        assert_eq!(
            store.public_url("1_a.jpg").as_deref(),
            Some("http://localhost:8080/uploads/1_a.jpg")
        );
        assert_eq!(store.fetch("1_a.jpg").unwrap(), b"jpeg");
    }

    #[test]
    fn test_public_url_absent_for_missing_object() {
        let dir = TempDir::new().unwrap();
        let store = FileObjectStore::new(dir.path(), "uploads", "http://x").unwrap();
        assert_eq!(store.public_url("nope.jpg"), None);
        assert_eq!(
            store.fetch("nope.jpg"),
            Err(ObjectStoreError::NotFound("nope.jpg".into()))
        );
    }

    #[test]
    fn test_rejects_duplicate_and_invalid_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileObjectStore::new(dir.path(), "uploads", "http://x").unwrap();
        store.upload("k.png", b"1", "image/png").unwrap();
        assert!(matches!(
            store.upload("k.png", b"2", "image/png"),
            Err(ObjectStoreError::WriteFailed(_))
        ));
        assert_eq!(
            store.upload("../k.png", b"2", "image/png"),
            Err(ObjectStoreError::InvalidKey("../k.png".into()))
        );
        assert_eq!(store.fetch("k.png").unwrap(), b"1");
    }

    #[test]
    fn test_rejects_nested_bucket_name() {
        let dir = TempDir::new().unwrap();
        assert!(FileObjectStore::new(dir.path(), "a/b", "http://x").is_err());
    }
}
