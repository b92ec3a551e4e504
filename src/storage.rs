//! Storage subsystem
//!
//! This module provides the persistence seams of the application and their
//! implementations.
//!
//! Components:
//! - `storage_trait`: the `KeyValueSlot` and `ObjectStore` traits.
//! - `types`: slot/bucket naming rules and default names.
//! - `file_storage`: filesystem-backed key-value slots (one JSON file per slot).
//! - `database_storage`: SQLite key-value slots using SeaORM.
//! - `db_entities`: SeaORM entity model for the database backend.
//! - `object_storage`: filesystem-backed object store for uploaded images.

pub mod database_storage;
pub mod db_entities;
pub mod file_storage;
pub mod object_storage;
pub mod storage_trait;
pub mod types;

pub use database_storage::DatabaseSlot;
pub use file_storage::FileSlot;
pub use object_storage::FileObjectStore;
pub use storage_trait::{KeyValueSlot, ObjectStore};
