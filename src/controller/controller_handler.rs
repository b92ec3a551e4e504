use std::fs;
use std::sync::{Arc, Mutex};

use chrono::{Datelike, Utc};
use log::{error, info, warn};
use serde::Serialize;
use uuid::Uuid;

use super::command::Command;
use crate::configuration::config::Config;
use crate::configuration::types::StorageBackend;
use crate::error_handling::types::*;
use crate::notification::feed::NotificationFeed;
use crate::photo_management::photo::{PhotoPatch, PhotoRecord};
use crate::photo_management::photo_store::PhotoStore;
use crate::storage::database_storage::DatabaseSlot;
use crate::storage::file_storage::FileSlot;
use crate::storage::object_storage::FileObjectStore;
use crate::storage::storage_trait::{KeyValueSlot, ObjectStore};
use crate::upload::upload_flow::{UploadFlow, UploadRequest};
use crate::web_interface::handlers::{lock_store, AppState};
use crate::web_interface::web_server::WebServer;

/// Wires configuration, storage, the photo store and the upload flow together.
///
/// Construction and [`Controller::execute`] may block on the SQLite backend,
/// so async callers run them on the blocking pool.
pub struct Controller {
    config: Config,
    store: Arc<Mutex<PhotoStore>>,
    upload: Arc<UploadFlow>,
    objects: Arc<dyn ObjectStore>,
    feed: Arc<NotificationFeed>,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ControllerError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ControllerError::StoreError(StoreError::ExportFailed(e.to_string())))
}

impl Controller {
    pub fn new(config: Config) -> Result<Self, ControllerError> {
        info!("Creating controller for {}", config.storage_path.display());

        let slot: Arc<dyn KeyValueSlot> = match config.storage_backend {
            StorageBackend::File => Arc::new(FileSlot::new(&config.storage_path)?),
            StorageBackend::Database => Arc::new(DatabaseSlot::new_file(config.database_path())?),
        };
        let objects: Arc<dyn ObjectStore> = Arc::new(FileObjectStore::new(
            &config.storage_path,
            &config.bucket,
            &config.public_base_url(),
        )?);
        let feed = Arc::new(NotificationFeed::new(config.notification_capacity));

        let mut store = PhotoStore::new(slot, config.slot_name.clone(), feed.clone());
        match store.load() {
            Ok(count) => info!("Loaded {} photo(s)", count),
            Err(e) => error!("Starting with an empty collection: {}", e),
        }

        let upload = Arc::new(UploadFlow::new(objects.clone(), feed.clone()));
        Ok(Self {
            config,
            store: Arc::new(Mutex::new(store)),
            upload,
            objects,
            feed,
        })
    }

    pub fn store(&self) -> &Mutex<PhotoStore> {
        &self.store
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            store: self.store.clone(),
            upload: self.upload.clone(),
            objects: self.objects.clone(),
            feed: self.feed.clone(),
            bucket: self.config.bucket.clone(),
        }
    }

    /// Runs the web interface until the process stops.
    pub async fn serve(&self) -> Result<(), ControllerError> {
        let addr = WebServer::socket_addr(&self.config.bind_address, self.config.port)?;
        WebServer::new(self.app_state()).start(addr).await?;
        Ok(())
    }

    /// Runs a one-shot command and returns the text to print.
    pub fn execute(&self, command: Command) -> Result<String, ControllerError> {
        match command {
            Command::Serve => Err(ConfigError::ArgsError(
                "serve is not a one-shot command".to_string(),
            )
            .into()),
            Command::List { year } => {
                let store = lock_store(&self.store);
                let photos = store.gallery(year);
                to_json(&photos)
            }
            Command::Years => to_json(&lock_store(&self.store).get_years()),
            Command::Special => to_json(&lock_store(&self.store).get_special_photos()),
            Command::Add {
                image,
                description,
                year,
                special,
            } => {
                let bytes = fs::read(&image)?;
                let file_name = image
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let request = UploadRequest {
                    file_name,
                    bytes,
                    description,
                    year: year.unwrap_or_else(|| Utc::now().year()),
                    is_special: special,
                };
                let record = self.upload.submit(request, &self.store)?;
                to_json(&record)
            }
            Command::Update {
                id,
                description,
                year,
                special,
            } => {
                let patch = PhotoPatch {
                    description,
                    year,
                    is_special: special,
                    ..PhotoPatch::default()
                };
                if patch.is_empty() {
                    return Err(ConfigError::ArgsError(
                        "update needs --description, --year or --special".to_string(),
                    )
                    .into());
                }
                let updated = lock_store(&self.store).update_photo(id, &patch)?;
                to_json(&Self::found(id, updated)?)
            }
            Command::Toggle { id } => {
                let toggled = lock_store(&self.store).toggle_special(id)?;
                to_json(&Self::found(id, toggled)?)
            }
            Command::Delete { id } => {
                if !lock_store(&self.store).delete_photo(id)? {
                    return Err(ControllerError::NotFound(id.to_string()));
                }
                Ok(format!("Deleted {}", id))
            }
            Command::Export { out } => {
                let doc = lock_store(&self.store).export_data()?;
                let path = doc.write_to_dir(&out)?;
                Ok(format!("Exported to {}", path.display()))
            }
            Command::Import { file } => {
                let text = fs::read_to_string(&file)?;
                let count = lock_store(&self.store).import_data(&text)?;
                Ok(format!("Imported {} memories.", count))
            }
        }
    }

    fn found(id: Uuid, record: Option<PhotoRecord>) -> Result<PhotoRecord, ControllerError> {
        record.ok_or_else(|| {
            warn!("No photo with id {}", id);
            ControllerError::NotFound(id.to_string())
        })
    }
}
