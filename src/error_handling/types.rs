use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    TomlError(String),
    ArgsError(String),
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            ConfigError::ArgsError(e) => write!(f, "Command-line error: {}", e),
            ConfigError::InvalidValue(e) => write!(f, "Invalid configuration value: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::TomlError(err.to_string())
    }
}

/// Failures of a durable key-value slot backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    ConnectionFailed,
    WriteFailed,
    ReadFailed,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ConnectionFailed => write!(f, "Storage connection failed"),
            StorageError::WriteFailed => write!(f, "Storage write failed"),
            StorageError::ReadFailed => write!(f, "Storage read failed"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Failures of the object store holding uploaded image bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectStoreError {
    InvalidKey(String),
    WriteFailed(String),
    NotFound(String),
}

impl fmt::Display for ObjectStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectStoreError::InvalidKey(k) => write!(f, "Invalid object key: {}", k),
            ObjectStoreError::WriteFailed(e) => write!(f, "Object upload failed: {}", e),
            ObjectStoreError::NotFound(k) => write!(f, "Object not found: {}", k),
        }
    }
}

impl std::error::Error for ObjectStoreError {}

/// Failures reported by the photo store.
///
/// `PersistFailed` means the in-memory mutation was applied but the durable
/// snapshot could not be written; the two may now disagree. `NotLoaded` is
/// returned by writes attempted before the first load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    LoadFailed(String),
    NotLoaded,
    PersistFailed(StorageError),
    ImportFailed(String),
    ExportFailed(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LoadFailed(e) => write!(f, "Unable to load photos: {}", e),
            StoreError::NotLoaded => write!(f, "Photos have not been loaded yet"),
            StoreError::PersistFailed(e) => write!(f, "Unable to save photos: {}", e),
            StoreError::ImportFailed(e) => write!(f, "Unable to import photos: {}", e),
            StoreError::ExportFailed(e) => write!(f, "Unable to export photos: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        StoreError::PersistFailed(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    MissingImage,
    MissingDescription,
    AlreadyInProgress,
    UploadFailed(ObjectStoreError),
    PublicUrlUnavailable(String),
    Store(StoreError),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::MissingImage => write!(f, "No image selected"),
            UploadError::MissingDescription => write!(f, "A description is required"),
            UploadError::AlreadyInProgress => write!(f, "An upload is already in progress"),
            UploadError::UploadFailed(e) => write!(f, "Upload failed: {}", e),
            UploadError::PublicUrlUnavailable(k) => {
                write!(f, "No public URL available for uploaded object {}", k)
            }
            UploadError::Store(e) => write!(f, "Photo store error: {}", e),
        }
    }
}

impl std::error::Error for UploadError {}

impl From<ObjectStoreError> for UploadError {
    fn from(err: ObjectStoreError) -> Self {
        UploadError::UploadFailed(err)
    }
}

impl From<StoreError> for UploadError {
    fn from(err: StoreError) -> Self {
        UploadError::Store(err)
    }
}

#[derive(Debug)]
pub enum WebError {
    InvalidAddress(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::InvalidAddress(e) => write!(f, "Invalid listen address: {}", e),
        }
    }
}

impl std::error::Error for WebError {}

#[derive(Debug)]
pub enum ControllerError {
    ConfigurationError(ConfigError),
    StorageError(StorageError),
    StoreError(StoreError),
    UploadError(UploadError),
    WebError(WebError),
    NotFound(String),
    IoError(std::io::Error),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::ConfigurationError(e) => write!(f, "Configuration error: {}", e),
            ControllerError::StorageError(e) => write!(f, "Storage error: {}", e),
            ControllerError::StoreError(e) => write!(f, "Store error: {}", e),
            ControllerError::UploadError(e) => write!(f, "Upload error: {}", e),
            ControllerError::WebError(e) => write!(f, "Web error: {}", e),
            ControllerError::NotFound(id) => write!(f, "No photo with id {}", id),
            ControllerError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ControllerError {}

impl From<ConfigError> for ControllerError {
    fn from(err: ConfigError) -> Self {
        ControllerError::ConfigurationError(err)
    }
}

impl From<StorageError> for ControllerError {
    fn from(err: StorageError) -> Self {
        ControllerError::StorageError(err)
    }
}

impl From<StoreError> for ControllerError {
    fn from(err: StoreError) -> Self {
        ControllerError::StoreError(err)
    }
}

impl From<UploadError> for ControllerError {
    fn from(err: UploadError) -> Self {
        ControllerError::UploadError(err)
    }
}

impl From<WebError> for ControllerError {
    fn from(err: WebError) -> Self {
        ControllerError::WebError(err)
    }
}

impl From<std::io::Error> for ControllerError {
    fn from(err: std::io::Error) -> Self {
        ControllerError::IoError(err)
    }
}
