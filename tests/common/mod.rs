#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use memories::notification::notifier::{Notification, Notifier};
use memories::photo_management::photo::NewPhoto;
use memories::photo_management::photo_store::PhotoStore;
use memories::storage::storage_trait::KeyValueSlot;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Collects notifications for assertions.
#[derive(Default)]
pub struct Recorder(Mutex<Vec<Notification>>);

impl Recorder {
    pub fn titles(&self) -> Vec<String> {
        self.0.lock().unwrap().iter().map(|n| n.title.clone()).collect()
    }
}

impl Notifier for Recorder {
    fn notify(&self, notification: Notification) {
        self.0.lock().unwrap().push(notification);
    }
}

pub fn loaded_store(slot: Arc<dyn KeyValueSlot>, notes: Arc<Recorder>) -> PhotoStore {
    let mut store = PhotoStore::new(slot, "photos", notes);
    store.load().unwrap();
    store
}

pub fn photo(description: &str, year: i32, is_special: bool) -> NewPhoto {
    NewPhoto {
        url: format!("https://cdn.test/uploads/{}.jpg", description.to_lowercase()),
        description: description.to_string(),
        year,
        is_special,
        date: None,
    }
}
