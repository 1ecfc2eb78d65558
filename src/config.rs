use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "ClinicBooking";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the SQLite key-value store inside the data directory.
pub const STORE_FILE_NAME: &str = "clinic.db";

/// Get the application data directory
/// ~/ClinicBooking/ on all platforms. Falls back to the working directory
/// when no home directory can be resolved (containers, service accounts).
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the durable key-value store.
pub fn store_path() -> PathBuf {
    app_data_dir().join(STORE_FILE_NAME)
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,clinic_booking_lib=debug"
}

// ═══════════════════════════════════════════════════════════
// ClinicConfig: business constants
// ═══════════════════════════════════════════════════════════

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Fixed staff login and the profile shown once logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffAccount {
    pub username: String,
    pub password: String,
    pub name: String,
    pub qualification: String,
}

impl Default for StaffAccount {
    fn default() -> Self {
        Self {
            username: "doctor".into(),
            password: "admin123".into(),
            name: "Dr. Deepthi".into(),
            qualification: "MD (Homeopathy), Rajiv Gandhi University Karnataka".into(),
        }
    }
}

/// Tunable booking rules. Every field has a default, so a partial JSON
/// file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicConfig {
    /// Same-day slots must start strictly later than now + this many minutes.
    pub booking_lead_minutes: u32,
    /// Word limit for the appointment problem description.
    pub max_description_words: usize,
    /// Word limit for contact-page messages.
    pub max_message_words: usize,
    pub min_age: u32,
    pub max_age: u32,
    /// Digits required in a phone number once formatting is stripped.
    pub phone_digits: usize,
    pub staff: StaffAccount,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            booking_lead_minutes: 30,
            max_description_words: 200,
            max_message_words: 300,
            min_age: 1,
            max_age: 120,
            phone_digits: 10,
            staff: StaffAccount::default(),
        }
    }
}

impl ClinicConfig {
    /// Load overrides from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded clinic config");
        Ok(config)
    }
}
