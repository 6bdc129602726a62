mod config;
pub mod database;
pub mod memory;

pub use config::{AdviceConfig, AlarmConfig, Config, RitualConfig};
pub use database::Database;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

use crate::error::{CoreError, StorageError};

/// Keys under which application state is persisted.
pub mod keys {
    pub const WELCOME_SEEN: &str = "hc_welcome_seen";
    pub const PROFILE: &str = "hc_profile";
    pub const SYMPTOMS: &str = "hc_symptoms";
    pub const WEIGHTS: &str = "hc_weights";
    pub const RITUAL_STATE: &str = "hc_ritual_state";
    pub const RITUAL_START: &str = "hc_ritual_start";
    pub const WAIT_MINUTES: &str = "hc_wait_minutes";
}

/// Synchronous, string-keyed, device-local storage.
///
/// Values are opaque text; callers serialize with [`save_json`] and read
/// back with [`load_json`]. Writes are last-write-wins.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
    /// Drop every key. Used by the full application reset.
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// Read and parse a JSON value.
///
/// Missing keys, unreadable stores and malformed JSON all come back as
/// `None`; the latter two are logged.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "failed to read stored value; treating as absent");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "discarding malformed stored value");
            None
        }
    }
}

/// Serialize `value` as JSON text and store it under `key`.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), CoreError>
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let text = serde_json::to_string(value)?;
    store.set(key, &text)?;
    Ok(())
}

/// Returns the data directory, creating it if needed.
///
/// `THYROID_DATA_DIR` wins outright. Otherwise `~/.config/thyroid-ritual/`,
/// or `~/.config/thyroid-ritual-dev/` when `THYROID_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("THYROID_DATA_DIR") {
        Some(path) => PathBuf::from(path),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("THYROID_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("thyroid-ritual-dev")
            } else {
                base_dir.join("thyroid-ritual")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(StorageError::DataDir)?;
    Ok(dir)
}
