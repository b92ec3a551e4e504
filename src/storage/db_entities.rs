//! SeaORM entity model used by the database slot backend.
//!
//! Maps to the SQLite table created by `database_storage`:
//! - `slots`: one row per named slot, holding the serialized snapshot

use sea_orm::entity::prelude::*;

/// Slots table entity model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "slots")]
pub struct Model {
    /// Slot name
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Serialized snapshot, overwritten on every write
    pub value: String,
    /// RFC3339 timestamp of the last write
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
