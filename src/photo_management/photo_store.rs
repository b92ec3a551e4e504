use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use log::{debug, error, info, warn};
use uuid::Uuid;

use crate::error_handling::types::{StorageError, StoreError};
use crate::notification::notifier::{Notification, Notifier};
use crate::photo_management::export::ExportDocument;
use crate::photo_management::photo::{NewPhoto, PhotoPatch, PhotoRecord};
use crate::storage::storage_trait::KeyValueSlot;

/// The photo collection and its durable snapshot.
///
/// All reads and writes of photos go through this type. Every mutation ends
/// with [`PhotoStore::sync`], which rewrites the whole collection into a
/// single key-value slot. A failed write is reported but the in-memory change
/// is kept, so memory and the snapshot may diverge until the next successful
/// sync.
///
/// Update, toggle and delete on an unknown id are no-ops: they report
/// `None`/`false` and leave both the collection and the snapshot untouched.
pub struct PhotoStore {
    photos: Vec<PhotoRecord>,
    is_loading: bool,
    slot: Arc<dyn KeyValueSlot>,
    slot_name: String,
    notifier: Arc<dyn Notifier>,
}

impl PhotoStore {
    /// Creates an empty store. Call [`PhotoStore::load`] before mutating it;
    /// until then mutations and [`PhotoStore::sync`] fail with
    /// `StoreError::NotLoaded` and no snapshot is written.
    pub fn new(
        slot: Arc<dyn KeyValueSlot>,
        slot_name: impl Into<String>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            photos: Vec::new(),
            is_loading: true,
            slot,
            slot_name: slot_name.into(),
            notifier,
        }
    }

    /// Rehydrates the collection from the slot.
    ///
    /// A missing snapshot yields an empty collection. An unreadable or
    /// malformed one also yields an empty collection but is reported as
    /// `StoreError::LoadFailed`; the store stays usable either way.
    pub fn load(&mut self) -> Result<usize, StoreError> {
        self.is_loading = true;
        let result = self.read_snapshot();
        self.is_loading = false;

        match result {
            Ok(photos) => {
                self.photos = photos;
                info!(
                    "Loaded {} photo(s) from slot {}",
                    self.photos.len(),
                    self.slot_name
                );
                Ok(self.photos.len())
            }
            Err(e) => {
                self.photos.clear();
                error!("Error loading photos: {}", e);
                self.notifier.notify(Notification::error(
                    "Error",
                    "Unable to load memories. Please try again.",
                ));
                Err(e)
            }
        }
    }

    fn read_snapshot(&self) -> Result<Vec<PhotoRecord>, StoreError> {
        let snapshot = self
            .slot
            .get(&self.slot_name)
            .map_err(|e| StoreError::LoadFailed(e.to_string()))?;
        match snapshot {
            None => {
                debug!("Slot {} is empty, starting fresh", self.slot_name);
                Ok(Vec::new())
            }
            Some(text) => serde_json::from_str(&text)
                .map_err(|e| StoreError::LoadFailed(format!("malformed snapshot: {}", e))),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn get_photo(&self, id: Uuid) -> Option<&PhotoRecord> {
        self.photos.iter().find(|p| p.id() == id)
    }

    fn ensure_loaded(&self) -> Result<(), StoreError> {
        if self.is_loading {
            warn!("Slot {} has not been loaded yet", self.slot_name);
            return Err(StoreError::NotLoaded);
        }
        Ok(())
    }

    /// Writes the full collection into the slot, replacing the previous snapshot.
    pub fn sync(&self) -> Result<(), StoreError> {
        self.ensure_loaded()?;
        let snapshot = serde_json::to_string(&self.photos).map_err(|e| {
            error!("Failed to serialize photos: {}", e);
            StoreError::PersistFailed(StorageError::WriteFailed)
        })?;
        self.slot.set(&self.slot_name, &snapshot)?;
        debug!(
            "Synced {} photo(s) to slot {}",
            self.photos.len(),
            self.slot_name
        );
        Ok(())
    }

    fn sync_or_notify(&self) -> Result<(), StoreError> {
        self.sync().map_err(|e| {
            error!("Error saving photos: {}", e);
            self.notifier.notify(Notification::error(
                "Error",
                "Unable to save memories. Please try again.",
            ));
            e
        })
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if self.get_photo(id).is_none() {
                return id;
            }
        }
    }

    /// Appends a new record with a fresh id and persists the collection.
    pub fn add_photo(&mut self, photo: NewPhoto) -> Result<PhotoRecord, StoreError> {
        self.ensure_loaded()?;
        let record = PhotoRecord::from_new(self.fresh_id(), photo);
        self.photos.push(record.clone());
        info!("Added photo {} ({})", record.id(), record.year());
        self.sync_or_notify()?;
        Ok(record)
    }

    pub fn update_photo(
        &mut self,
        id: Uuid,
        patch: &PhotoPatch,
    ) -> Result<Option<PhotoRecord>, StoreError> {
        self.ensure_loaded()?;
        let Some(photo) = self.photos.iter_mut().find(|p| p.id() == id) else {
            debug!("Update of unknown photo {} ignored", id);
            return Ok(None);
        };
        photo.apply(patch);
        let updated = photo.clone();
        info!("Updated photo {}", id);
        self.sync_or_notify()?;
        Ok(Some(updated))
    }

    pub fn delete_photo(&mut self, id: Uuid) -> Result<bool, StoreError> {
        self.ensure_loaded()?;
        let before = self.photos.len();
        self.photos.retain(|p| p.id() != id);
        if self.photos.len() == before {
            debug!("Delete of unknown photo {} ignored", id);
            return Ok(false);
        }
        info!("Deleted photo {}", id);
        self.sync_or_notify()?;
        Ok(true)
    }

    pub fn toggle_special(&mut self, id: Uuid) -> Result<Option<PhotoRecord>, StoreError> {
        self.ensure_loaded()?;
        let Some(photo) = self.photos.iter_mut().find(|p| p.id() == id) else {
            debug!("Toggle of unknown photo {} ignored", id);
            return Ok(None);
        };
        photo.toggle_special();
        let toggled = photo.clone();
        info!("Photo {} special: {}", id, toggled.is_special());
        self.sync_or_notify()?;
        Ok(Some(toggled))
    }

    pub fn get_photos_by_year(&self, year: i32) -> Vec<&PhotoRecord> {
        self.photos.iter().filter(|p| p.year() == year).collect()
    }

    pub fn get_special_photos(&self) -> Vec<&PhotoRecord> {
        self.photos.iter().filter(|p| p.is_special()).collect()
    }

    /// Distinct years, newest first.
    pub fn get_years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self.photos.iter().map(|p| p.year()).collect();
        years.into_iter().rev().collect()
    }

    /// Gallery listing: optionally filtered by year, newest `date` first.
    /// Undated records come last; ties keep collection order.
    pub fn gallery(&self, year: Option<i32>) -> Vec<&PhotoRecord> {
        let mut photos: Vec<&PhotoRecord> = self
            .photos
            .iter()
            .filter(|p| year.map_or(true, |y| p.year() == y))
            .collect();
        photos.sort_by(|a, b| b.date().cmp(&a.date()));
        photos
    }

    pub fn export_data(&self) -> Result<ExportDocument, StoreError> {
        match serde_json::to_string(&self.photos) {
            Ok(contents) => {
                info!("Exported {} photo(s)", self.photos.len());
                Ok(ExportDocument::new(contents))
            }
            Err(e) => {
                error!("Error exporting data: {}", e);
                self.notifier.notify(Notification::error(
                    "Error",
                    "Unable to export data. Please try again.",
                ));
                Err(StoreError::ExportFailed(e.to_string()))
            }
        }
    }

    /// Replaces the whole collection with the records in `json_text`.
    ///
    /// Nothing is merged. Documents that are not a list of records, or that
    /// repeat an id, are rejected and the collection is left as it was.
    pub fn import_data(&mut self, json_text: &str) -> Result<usize, StoreError> {
        let parsed = match Self::parse_import(json_text) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Error importing data: {}", e);
                self.notifier.notify(Notification::error(
                    "Error",
                    "Unable to import data. Please check the file format.",
                ));
                return Err(e);
            }
        };
        let count = parsed.len();
        self.photos = parsed;
        // an import is an explicit user action; treat the store as loaded
        self.is_loading = false;
        info!("Imported {} photo(s)", count);
        self.sync_or_notify()?;
        self.notifier.notify(Notification::success(
            "Success",
            format!("Imported {} memories.", count),
        ));
        Ok(count)
    }

    fn parse_import(json_text: &str) -> Result<Vec<PhotoRecord>, StoreError> {
        let parsed: Vec<PhotoRecord> =
            serde_json::from_str(json_text).map_err(|e| StoreError::ImportFailed(e.to_string()))?;
        let mut ids = HashSet::with_capacity(parsed.len());
        if let Some(dup) = parsed.iter().find(|p| !ids.insert(p.id())) {
            return Err(StoreError::ImportFailed(format!("duplicate id {}", dup.id())));
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::notifier::Severity;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemSlot {
        values: Mutex<HashMap<String, String>>,
        writes: Mutex<usize>,
        fail_writes: Mutex<bool>,
    }

    impl MemSlot {
        fn with(slot: &str, value: &str) -> Self {
            let mem = Self::default();
            mem.values
                .lock()
                .unwrap()
                .insert(slot.to_string(), value.to_string());
            mem
        }

        fn value(&self, slot: &str) -> Option<String> {
            self.values.lock().unwrap().get(slot).cloned()
        }

        fn writes(&self) -> usize {
            *self.writes.lock().unwrap()
        }
    }

    impl KeyValueSlot for MemSlot {
        fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
            Ok(self.value(slot))
        }

        fn set(&self, slot: &str, value: &str) -> Result<(), StorageError> {
            if *self.fail_writes.lock().unwrap() {
                return Err(StorageError::WriteFailed);
            }
            *self.writes.lock().unwrap() += 1;
            self.values
                .lock()
                .unwrap()
                .insert(slot.to_string(), value.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<Notification>>,
    }

    impl Notifier for Recorder {
        fn notify(&self, notification: Notification) {
            self.seen.lock().unwrap().push(notification);
        }
    }

    fn loaded_store(slot: Arc<MemSlot>) -> (PhotoStore, Arc<Recorder>) {
        let notes = Arc::new(Recorder::default());
        let mut store = PhotoStore::new(slot, "photos", notes.clone());
        store.load().unwrap();
        (store, notes)
    }

    fn new_photo(description: &str, year: i32) -> NewPhoto {
        NewPhoto {
            url: format!("http://x/{}.jpg", description),
            description: description.to_string(),
            year,
            is_special: false,
            date: None,
        }
    }

    #[test]
    fn test_load_missing_snapshot_starts_empty() {
        let slot = Arc::new(MemSlot::default());
        let notes = Arc::new(Recorder::default());
        let mut store = PhotoStore::new(slot, "photos", notes.clone());
        assert!(store.is_loading());

        assert_eq!(store.load(), Ok(0));
        assert!(!store.is_loading());
        assert!(store.is_empty());
        assert!(notes.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_load_malformed_snapshot_is_recoverable() {
        let slot = Arc::new(MemSlot::with("photos", "{broken"));
        let notes = Arc::new(Recorder::default());
        let mut store = PhotoStore::new(slot.clone(), "photos", notes.clone());

        assert!(matches!(store.load(), Err(StoreError::LoadFailed(_))));
        assert!(!store.is_loading());
        assert!(store.is_empty());
        assert_eq!(notes.seen.lock().unwrap()[0].severity, Severity::Error);

        // still usable afterwards
        store.add_photo(new_photo("after", 2024)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_photo_appends_and_persists() {
        let slot = Arc::new(MemSlot::default());
        let (mut store, _) = loaded_store(slot.clone());

        let first = store.add_photo(new_photo("a", 2021)).unwrap();
        let second = store.add_photo(new_photo("b", 2022)).unwrap();

        assert_eq!(store.len(), 2);
        assert_ne!(first.id(), second.id());
        assert_eq!(store.photos()[1], second);
        assert_eq!(second.description(), "b");
        assert_eq!(second.year(), 2022);

        let persisted: Vec<PhotoRecord> =
            serde_json::from_str(&slot.value("photos").unwrap()).unwrap();
        assert_eq!(persisted, store.photos());
    }

    #[test]
    fn test_persist_failure_keeps_in_memory_change() {
        let slot = Arc::new(MemSlot::default());
        let (mut store, notes) = loaded_store(slot.clone());
        *slot.fail_writes.lock().unwrap() = true;

        let result = store.add_photo(new_photo("a", 2021));

        assert_eq!(
            result,
            Err(StoreError::PersistFailed(StorageError::WriteFailed))
        );
        assert_eq!(store.len(), 1);
        assert_eq!(slot.value("photos"), None);
        assert_eq!(notes.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_id_is_a_no_op() {
        let slot = Arc::new(MemSlot::default());
        let (mut store, _) = loaded_store(slot.clone());
        store.add_photo(new_photo("a", 2021)).unwrap();
        let before = store.photos().to_vec();
        let writes = slot.writes();

        let missing = Uuid::new_v4();
        let patch = PhotoPatch {
            year: Some(1999),
            ..Default::default()
        };
        assert_eq!(store.update_photo(missing, &patch), Ok(None));
        assert_eq!(store.toggle_special(missing), Ok(None));
        assert_eq!(store.delete_photo(missing), Ok(false));

        assert_eq!(store.photos(), before.as_slice());
        assert_eq!(slot.writes(), writes);
    }

    #[test]
    fn test_update_preserves_id_and_position() {
        let slot = Arc::new(MemSlot::default());
        let (mut store, _) = loaded_store(slot);
        let a = store.add_photo(new_photo("a", 2021)).unwrap();
        store.add_photo(new_photo("b", 2021)).unwrap();

        let patch = PhotoPatch {
            description: Some("changed".into()),
            year: Some(2020),
            ..Default::default()
        };
        let updated = store.update_photo(a.id(), &patch).unwrap().unwrap();

        assert_eq!(updated.id(), a.id());
        assert_eq!(store.photos()[0].description(), "changed");
        assert_eq!(store.photos()[0].year(), 2020);
        assert_eq!(store.photos()[0].url(), a.url());
        assert_eq!(store.photos()[1].description(), "b");
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let slot = Arc::new(MemSlot::default());
        let (mut store, _) = loaded_store(slot);
        let photo = store.add_photo(new_photo("a", 2021)).unwrap();

        assert!(store.toggle_special(photo.id()).unwrap().unwrap().is_special());
        assert!(!store.toggle_special(photo.id()).unwrap().unwrap().is_special());
        assert_eq!(store.get_photo(photo.id()).unwrap(), &photo);
    }

    #[test]
    fn test_deleted_photo_disappears_from_queries() {
        let slot = Arc::new(MemSlot::default());
        let (mut store, _) = loaded_store(slot);
        let keep = store.add_photo(new_photo("keep", 2023)).unwrap();
        let gone = store.add_photo(new_photo("gone", 2023)).unwrap();
        store.toggle_special(gone.id()).unwrap();
        store.toggle_special(keep.id()).unwrap();

        assert_eq!(store.delete_photo(gone.id()), Ok(true));

        assert!(store.get_photos_by_year(2023).iter().all(|p| p.id() != gone.id()));
        assert!(store.get_special_photos().iter().all(|p| p.id() != gone.id()));
        assert_eq!(store.get_special_photos().len(), 1);
    }

    #[test]
    fn test_years_are_distinct_and_descending() {
        let slot = Arc::new(MemSlot::default());
        let (mut store, _) = loaded_store(slot);
        for (i, year) in [2021, 2023, 2021, 2022].into_iter().enumerate() {
            store.add_photo(new_photo(&i.to_string(), year)).unwrap();
        }
        assert_eq!(store.get_years(), vec![2023, 2022, 2021]);
        assert!(store.get_photos_by_year(1990).is_empty());

        let in_2021: Vec<&str> = store
            .get_photos_by_year(2021)
            .iter()
            .map(|p| p.description())
            .collect();
        assert_eq!(in_2021, vec!["0", "2"]);
    }

    #[test]
    fn test_trip_scenario() {
        let slot = Arc::new(MemSlot::default());
        let (mut store, _) = loaded_store(slot);
        let trip = store
            .add_photo(NewPhoto {
                url: "http://x/a.jpg".into(),
                description: "Trip".into(),
                year: 2022,
                is_special: false,
                date: None,
            })
            .unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get_special_photos().is_empty());

        store.toggle_special(trip.id()).unwrap();

        let special = store.get_special_photos();
        assert_eq!(special.len(), 1);
        assert_eq!(special[0].id(), trip.id());
    }

    #[test]
    fn test_gallery_orders_by_date_then_insertion() {
        use chrono::{TimeZone, Utc};
        let slot = Arc::new(MemSlot::default());
        let (mut store, _) = loaded_store(slot);
        let early = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2022, 6, 1, 0, 0, 0).unwrap();

        let mut undated = new_photo("undated", 2022);
        undated.date = None;
        store.add_photo(undated).unwrap();
        let mut first = new_photo("early", 2022);
        first.date = Some(early);
        store.add_photo(first).unwrap();
        let mut second = new_photo("late", 2022);
        second.date = Some(late);
        store.add_photo(second).unwrap();
        let mut other_year = new_photo("other", 2019);
        other_year.date = Some(late);
        store.add_photo(other_year).unwrap();

        let names: Vec<&str> = store
            .gallery(Some(2022))
            .iter()
            .map(|p| p.description())
            .collect();
        assert_eq!(names, vec!["late", "early", "undated"]);
        assert_eq!(store.gallery(None).len(), 4);
    }

    #[test]
    fn test_export_import_roundtrip() {
        let slot = Arc::new(MemSlot::default());
        let (mut store, _) = loaded_store(slot);
        store.add_photo(new_photo("a", 2021)).unwrap();
        let b = store.add_photo(new_photo("b", 2022)).unwrap();
        store.toggle_special(b.id()).unwrap();
        let exported = store.export_data().unwrap();

        let other_slot = Arc::new(MemSlot::default());
        let (mut other, notes) = loaded_store(other_slot.clone());
        other.add_photo(new_photo("replaced", 2000)).unwrap();

        assert_eq!(other.import_data(&exported.contents), Ok(2));
        assert_eq!(other.photos(), store.photos());
        assert_eq!(other_slot.value("photos").unwrap(), exported.contents);
        let seen = notes.seen.lock().unwrap();
        assert_eq!(seen.last().unwrap().severity, Severity::Success);
        assert_eq!(seen.last().unwrap().message, "Imported 2 memories.");
    }

    #[test]
    fn test_import_garbage_leaves_collection_unchanged() {
        let slot = Arc::new(MemSlot::default());
        let (mut store, notes) = loaded_store(slot.clone());
        store.add_photo(new_photo("a", 2021)).unwrap();
        let before = store.photos().to_vec();
        let snapshot = slot.value("photos");

        assert!(matches!(
            store.import_data("not json"),
            Err(StoreError::ImportFailed(_))
        ));
        assert_eq!(store.photos(), before.as_slice());
        assert_eq!(slot.value("photos"), snapshot);
        assert_eq!(
            notes.seen.lock().unwrap().last().unwrap().severity,
            Severity::Error
        );
    }

    #[test]
    fn test_unloaded_store_rejects_sync_and_mutations() {
        let slot = Arc::new(MemSlot::with("photos", "[]"));
        let notes = Arc::new(Recorder::default());
        let mut store = PhotoStore::new(slot.clone(), "photos", notes);
        let id = Uuid::new_v4();

        assert_eq!(store.sync(), Err(StoreError::NotLoaded));
        assert_eq!(
            store.add_photo(new_photo("early", 2024)),
            Err(StoreError::NotLoaded)
        );
        assert_eq!(
            store.update_photo(id, &PhotoPatch::default()),
            Err(StoreError::NotLoaded)
        );
        assert_eq!(store.toggle_special(id), Err(StoreError::NotLoaded));
        assert_eq!(store.delete_photo(id), Err(StoreError::NotLoaded));
        assert!(store.is_empty());
        assert_eq!(slot.writes(), 0);

        store.load().unwrap();
        store.sync().unwrap();
        assert_eq!(slot.writes(), 1);
    }

    fn failing_writes(slot: &MemSlot) {
        *slot.fail_writes.lock().unwrap() = true;
    }

    fn last_severity(notes: &Recorder) -> Severity {
        notes.seen.lock().unwrap().last().unwrap().severity
    }

    #[test]
    fn test_update_persist_failure_keeps_change_and_notifies() {
        let slot = Arc::new(MemSlot::default());
        let (mut store, notes) = loaded_store(slot.clone());
        let photo = store.add_photo(new_photo("a", 2021)).unwrap();
        failing_writes(&slot);

        let patch = PhotoPatch {
            year: Some(2020),
            ..Default::default()
        };
        assert_eq!(
            store.update_photo(photo.id(), &patch),
            Err(StoreError::PersistFailed(StorageError::WriteFailed))
        );
        assert_eq!(store.get_photo(photo.id()).unwrap().year(), 2020);
        assert_eq!(last_severity(&notes), Severity::Error);
    }

    #[test]
    fn test_toggle_persist_failure_keeps_change_and_notifies() {
        let slot = Arc::new(MemSlot::default());
        let (mut store, notes) = loaded_store(slot.clone());
        let photo = store.add_photo(new_photo("a", 2021)).unwrap();
        failing_writes(&slot);

        assert!(matches!(
            store.toggle_special(photo.id()),
            Err(StoreError::PersistFailed(_))
        ));
        assert!(store.get_photo(photo.id()).unwrap().is_special());
        assert_eq!(last_severity(&notes), Severity::Error);
    }

    #[test]
    fn test_delete_persist_failure_keeps_change_and_notifies() {
        let slot = Arc::new(MemSlot::default());
        let (mut store, notes) = loaded_store(slot.clone());
        let photo = store.add_photo(new_photo("a", 2021)).unwrap();
        let snapshot = slot.value("photos");
        failing_writes(&slot);

        assert!(matches!(
            store.delete_photo(photo.id()),
            Err(StoreError::PersistFailed(_))
        ));
        assert!(store.is_empty());
        assert_eq!(slot.value("photos"), snapshot);
        assert_eq!(last_severity(&notes), Severity::Error);
    }

    #[test]
    fn test_import_persist_failure_keeps_change_and_notifies() {
        let slot = Arc::new(MemSlot::default());
        let (mut source, _) = loaded_store(Arc::new(MemSlot::default()));
        source.add_photo(new_photo("imported", 2019)).unwrap();
        let doc = source.export_data().unwrap();

        let (mut store, notes) = loaded_store(slot.clone());
        store.add_photo(new_photo("old", 2021)).unwrap();
        failing_writes(&slot);

        assert!(matches!(
            store.import_data(&doc.contents),
            Err(StoreError::PersistFailed(_))
        ));
        assert_eq!(store.photos(), source.photos());
        let seen = notes.seen.lock().unwrap();
        assert_eq!(seen.last().unwrap().severity, Severity::Error);
        assert!(seen.iter().all(|n| n.severity != Severity::Success));
    }

    #[test]
    fn test_import_rejects_repeated_ids() {
        let slot = Arc::new(MemSlot::default());
        let (mut store, notes) = loaded_store(slot.clone());
        let photo = store.add_photo(new_photo("a", 2021)).unwrap();
        let before = store.photos().to_vec();
        let snapshot = slot.value("photos");

        let twice = serde_json::to_string(&vec![photo.clone(), photo]).unwrap();
        assert!(matches!(
            store.import_data(&twice),
            Err(StoreError::ImportFailed(msg)) if msg.starts_with("duplicate id")
        ));
        assert_eq!(store.photos(), before.as_slice());
        assert_eq!(slot.value("photos"), snapshot);
        assert_eq!(last_severity(&notes), Severity::Error);
    }
}
