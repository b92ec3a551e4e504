//! Storage Traits
//!
//! This module defines the two persistence seams used by the application:
//!
//! - `KeyValueSlot`: a durable named slot holding one serialized string. The
//!   photo collection lives in a single slot as a JSON array.
//! - `ObjectStore`: a bucket of binary objects addressed by key, each with an
//!   optionally resolvable public URL. Uploaded images live here.
//!
//! All fallible methods return a `Result` so callers can decide how to report
//! the failure.

use crate::error_handling::types::{ObjectStoreError, StorageError};

/// A durable key-value slot.
///
/// `set` overwrites the previous value entirely.
pub trait KeyValueSlot: Send + Sync {
    /// Reads the value stored under `slot`, or `None` if it was never written.
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value stored under `slot`.
    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError>;
}

/// A bucket of uploaded objects.
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `key`.
    fn upload(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), ObjectStoreError>;

    /// Public retrieval URL for `key`, or `None` if the object cannot be served.
    fn public_url(&self, key: &str) -> Option<String>;

    /// Reads the bytes stored under `key`.
    fn fetch(&self, key: &str) -> Result<Vec<u8>, ObjectStoreError>;
}
