use std::path::Path;

use chrono::Utc;
use log::{debug, error, info};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, ConnectionTrait, Database, DatabaseConnection, EntityTrait};

use crate::error_handling::types::StorageError;
use crate::storage::db_entities as slots;
use crate::storage::storage_trait::KeyValueSlot;
use crate::storage::types::is_valid_slot_name;

/// SQLite-backed key-value slots using SeaORM.
///
/// SeaORM is async; the slot owns a current-thread runtime and blocks on it,
/// so callers running inside tokio must invoke it from the blocking pool.
pub struct DatabaseSlot {
    // dropped before the runtime that drives it
    db: DatabaseConnection,
    rt: tokio::runtime::Runtime,
}

impl DatabaseSlot {
    /// Default database filename used when no path is configured
    pub const DEFAULT_DB_FILE: &'static str = "memories.sqlite3";

    pub fn new_file<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                error!("Failed to build database runtime: {}", e);
                StorageError::ConnectionFailed
            })?;
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                error!("Failed to create database dir {}: {}", parent.display(), e);
                StorageError::WriteFailed
            })?;
        }
        let url = format!("sqlite://{}?mode=rwc", path_ref.display());
        let db = rt.block_on(async {
            let db = Database::connect(url.as_str()).await.map_err(|e| {
                error!("Failed to open database {}: {}", url, e);
                StorageError::ConnectionFailed
            })?;
            db.execute_unprepared(
                "CREATE TABLE IF NOT EXISTS slots (
                    key TEXT PRIMARY KEY NOT NULL,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );",
            )
            .await
            .map_err(|e| {
                error!("Failed to create slots table: {}", e);
                StorageError::WriteFailed
            })?;
            Ok::<_, StorageError>(db)
        })?;
        info!("DatabaseSlot initialized at {}", path_ref.display());
        Ok(Self { db, rt })
    }
}

impl KeyValueSlot for DatabaseSlot {
    fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
        if !is_valid_slot_name(slot) {
            return Err(StorageError::ReadFailed);
        }
        let row = self
            .rt
            .block_on(slots::Entity::find_by_id(slot.to_owned()).one(&self.db))
            .map_err(|e| {
                error!("Failed to read slot {}: {}", slot, e);
                StorageError::ReadFailed
            })?;
        debug!("Slot {} present: {}", slot, row.is_some());
        Ok(row.map(|r| r.value))
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
        if !is_valid_slot_name(slot) {
            return Err(StorageError::WriteFailed);
        }
        let row = slots::ActiveModel {
            key: ActiveValue::Set(slot.to_owned()),
            value: ActiveValue::Set(value.to_owned()),
            updated_at: ActiveValue::Set(Utc::now().to_rfc3339()),
        };
        self.rt
            .block_on(
                slots::Entity::insert(row)
                    .on_conflict(
                        OnConflict::column(slots::Column::Key)
                            .update_columns([slots::Column::Value, slots::Column::UpdatedAt])
                            .to_owned(),
                    )
                    .exec(&self.db),
            )
            .map_err(|e| {
                error!("Failed to write slot {}: {}", slot, e);
                StorageError::WriteFailed
            })?;
        debug!("Wrote {} byte(s) to slot {}", value.len(), slot);
        Ok(())
    }
}
