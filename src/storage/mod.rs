//! Durable key-value storage behind a small get/set/remove interface.
//!
//! Stores persist whole collections as JSON strings under fixed keys, the
//! same layout the browser build kept in local storage. Any backend that
//! implements [`KeyValueStore`] can be injected; `MemoryStore` serves tests
//! and ephemeral sessions, `SqliteStore` is the on-disk default.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Key holding the serialized appointment array.
pub const APPOINTMENTS_KEY: &str = "appointments";
/// Key holding the serialized contact-form array.
pub const CONTACT_FORMS_KEY: &str = "contactForms";
/// Key present (with value `"true"`) only while staff is logged in.
pub const DOCTOR_LOGIN_KEY: &str = "doctorLogin";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Internal lock error")]
    LockPoisoned,
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage handle shared by every store of one application state.
pub type SharedStorage = Arc<dyn KeyValueStore>;

/// Serializes `value` as JSON and writes it under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    storage: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)
}

/// Reads and parses the JSON under `key`.
///
/// Absent, unreadable or unparseable values yield `T::default()`; the
/// last two are logged so corrupt data does not go unnoticed.
pub fn load_json_or_default<T: DeserializeOwned + Default>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> T {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored value, starting empty");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored value is not valid JSON, starting empty");
            T::default()
        }
    }
}
