use super::types::*;
use crate::error_handling::types::ConfigError;
use crate::storage::database_storage::DatabaseSlot;
use crate::storage::types::{is_valid_slot_name, DEFAULT_BUCKET, DEFAULT_SLOT_NAME};
use crate::web_interface::routes::RESERVED_SEGMENTS;
use clap::Parser;
use log::info;
use serde::Deserialize;
use std::ffi::OsString;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

/// Environment variable overriding `storage_path`.
pub const DATA_DIR_ENV: &str = "MEMORIES_DATA_DIR";

/// Application configuration structure that defines all runtime parameters.
///
/// It can be built from command-line flags (`clap`) or from a TOML file
/// (`serde` + `toml`). Every field has a default, so an empty file or no flags
/// at all yields a working local setup.
///
/// # Fields Overview
///
/// - `bind_address` / `port`: where the web interface listens
/// - `storage_path`: data directory holding the slot snapshot and uploaded objects
/// - `storage_backend`: `file` (JSON slot files) or `database` (SQLite)
/// - `database_file`: SQLite file name, relative to `storage_path` unless absolute
/// - `slot_name`: key-value slot holding the photo collection
/// - `bucket`: object store bucket receiving uploads
/// - `public_base_url`: prefix of public object URLs, derived from the bind
///   address when unset
/// - `notification_capacity`: how many recent notifications are kept for polling
#[derive(Parser, Deserialize, Debug, Clone, PartialEq)]
#[command(name = "memories")]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Network address to bind the web interface to.
    #[arg(long, default_value = "127.0.0.1")]
    pub bind_address: String,

    /// TCP port of the web interface.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Directory where the photo snapshot and uploaded objects are stored.
    ///
    /// # Command Line
    /// Use `--storage-path <PATH>` or the `MEMORIES_DATA_DIR` environment variable
    #[arg(long, env = "MEMORIES_DATA_DIR", default_value = "memories-data")]
    pub storage_path: PathBuf,

    /// Key-value slot backend.
    #[arg(long, value_enum, default_value_t = StorageBackend::File)]
    pub storage_backend: StorageBackend,

    /// SQLite file used by the `database` backend.
    #[arg(long, default_value = DatabaseSlot::DEFAULT_DB_FILE)]
    pub database_file: PathBuf,

    /// Name of the slot holding the collection.
    #[arg(long, default_value = DEFAULT_SLOT_NAME)]
    pub slot_name: String,

    /// Object store bucket for uploaded images.
    #[arg(long, default_value = DEFAULT_BUCKET)]
    pub bucket: String,

    /// Base URL used to build public object URLs.
    #[arg(long)]
    pub public_base_url: Option<String>,

    /// Number of recent notifications kept in memory.
    #[arg(long, default_value_t = 50)]
    pub notification_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            storage_path: PathBuf::from("memories-data"),
            storage_backend: StorageBackend::File,
            database_file: PathBuf::from(DatabaseSlot::DEFAULT_DB_FILE),
            slot_name: DEFAULT_SLOT_NAME.to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
            public_base_url: None,
            notification_capacity: 50,
        }
    }
}

impl Config {
    /// Reads a TOML configuration file.
    ///
    /// Missing keys take their default value. `MEMORIES_DATA_DIR`, when set,
    /// overrides `storage_path` just like it does for command-line parsing.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            info!("Using storage path from {}: {}", DATA_DIR_ENV, dir);
            config.storage_path = PathBuf::from(dir);
        }
        config.validate()?;
        Ok(config)
    }

    /// Parses command-line style arguments, the first item being the binary name.
    pub fn try_from_args_iter<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let config =
            Self::try_parse_from(args).map_err(|e| ConfigError::ArgsError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_address.parse::<IpAddr>().map_err(|_| {
            ConfigError::InvalidValue(format!("bind_address {:?} is not an IP", self.bind_address))
        })?;
        if self.port == 0 {
            return Err(ConfigError::InvalidValue(
                "port must be between 1 and 65535".to_string(),
            ));
        }
        if !is_valid_slot_name(&self.slot_name) {
            return Err(ConfigError::InvalidValue(format!(
                "slot_name {:?} must be a single path segment",
                self.slot_name
            )));
        }
        if !is_valid_slot_name(&self.bucket) {
            return Err(ConfigError::InvalidValue(format!(
                "bucket {:?} must be a single path segment",
                self.bucket
            )));
        }
        if RESERVED_SEGMENTS.contains(&self.bucket.as_str()) {
            return Err(ConfigError::InvalidValue(format!(
                "bucket {:?} collides with an API route",
                self.bucket
            )));
        }
        if self.notification_capacity == 0 {
            return Err(ConfigError::InvalidValue(
                "notification_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn public_base_url(&self) -> String {
        match self.public_base_url {
            Some(ref url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", self.bind_address, self.port),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        if self.database_file.is_absolute() {
            self.database_file.clone()
        } else {
            self.storage_path.join(&self.database_file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    #[serial]
    fn test_from_args() {
        std::env::remove_var(DATA_DIR_ENV);
        let config = Config::try_from_args_iter([
            "memories",
            "--bind-address",
            "0.0.0.0",
            "--port",
            "9000",
            "--storage-path",
            "/tmp/memories",
            "--storage-backend",
            "database",
            "--bucket",
            "images",
        ])
        .unwrap_or_else(|e| panic!("{}", e));

        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.storage_path, PathBuf::from("/tmp/memories"));
        assert_eq!(config.storage_backend, StorageBackend::Database);
        assert_eq!(config.bucket, "images");
        assert_eq!(config.slot_name, "photos");
        assert_eq!(
            config.database_path(),
            PathBuf::from("/tmp/memories/memories.sqlite3")
        );
        assert_eq!(config.public_base_url(), "http://0.0.0.0:9000");
    }

    #[test]
    #[serial]
    fn test_bad_flags_are_args_errors() {
        std::env::remove_var(DATA_DIR_ENV);
        assert!(matches!(
            Config::try_from_args_iter(["memories", "--port", "nope"]),
            Err(ConfigError::ArgsError(_))
        ));
        assert!(matches!(
            Config::try_from_args_iter(["memories", "--port", "0"]),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    #[serial]
    fn test_defaults_match_between_flags_and_file() {
        std::env::remove_var(DATA_DIR_ENV);
        let from_flags = Config::try_parse_from(["memories"]).unwrap();
        let from_file = Config::from_toml_str("").unwrap();
        assert_eq!(from_flags, from_file);
        assert_eq!(from_file, Config::default());
    }

    #[test]
    #[serial]
    fn test_from_file_with_env_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "port = 8181\nstorage_backend = \"database\"\npublic_base_url = \"https://photos.example/\""
        )
        .unwrap();

        std::env::set_var(DATA_DIR_ENV, "/srv/memories");
        let config = Config::from_file(file.path());
        std::env::remove_var(DATA_DIR_ENV);
        let config = config.unwrap();

        assert_eq!(config.port, 8181);
        assert_eq!(config.storage_backend, StorageBackend::Database);
        assert_eq!(config.storage_path, PathBuf::from("/srv/memories"));
        assert_eq!(config.public_base_url(), "https://photos.example");
    }

    #[test]
    fn test_sample_config_matches_defaults() {
        let sample = Config::from_toml_str(include_str!("../../config/memories.toml")).unwrap();
        assert_eq!(sample, Config::default());
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_values() {
        assert!(matches!(
            Config::from_toml_str("max_sessions = 3"),
            Err(ConfigError::TomlError(_))
        ));

        let bad_bucket = Config {
            bucket: "../up".into(),
            ..Config::default()
        };
        assert!(matches!(
            bad_bucket.validate(),
            Err(ConfigError::InvalidValue(_))
        ));

        for reserved in ["photos", "years", "export", "import", "notifications"] {
            let shadowed = Config {
                bucket: reserved.into(),
                ..Config::default()
            };
            assert!(
                matches!(shadowed.validate(), Err(ConfigError::InvalidValue(_))),
                "bucket {} should be rejected",
                reserved
            );
        }

        let bad_addr = Config {
            bind_address: "localhost".into(),
            ..Config::default()
        };
        assert!(bad_addr.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }
}
