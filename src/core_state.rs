//! Explicit application state handed to every command handler.
//!
//! `ClinicState` owns the three stores built on one shared storage handle.
//! Nothing here is global: tests build a state over `MemoryStore` with a
//! fixed clock, the application builds one over `SqliteStore`.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

use crate::appointments::{AppointmentError, AppointmentStore};
use crate::config::{self, ClinicConfig};
use crate::contacts::{ContactError, ContactStore};
use crate::models::AppointmentStatus;
use crate::session::SessionGate;
use crate::storage::{SharedStorage, SqliteStore, StorageError};
use crate::validation::ValidationErrors;

type Clock = Box<dyn Fn() -> NaiveDateTime + Send + Sync>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Invalid submission: {0}")]
    Validation(ValidationErrors),

    #[error("Cannot change a {from} appointment to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    #[error(transparent)]
    Appointment(#[from] AppointmentError),

    #[error(transparent)]
    Contact(#[from] ContactError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct ClinicState {
    config: ClinicConfig,
    clock: Clock,
    pub appointments: AppointmentStore,
    pub contacts: ContactStore,
    pub session: SessionGate,
}

impl ClinicState {
    /// Rehydrates every store from `storage`. Uses the local wall clock.
    pub fn hydrate(storage: SharedStorage, config: ClinicConfig) -> Self {
        let appointments = AppointmentStore::hydrate(storage.clone());
        let contacts = ContactStore::hydrate(storage.clone());
        let session = SessionGate::hydrate(storage, config.staff.clone());
        tracing::info!(
            appointments = appointments.len(),
            contact_forms = contacts.len(),
            logged_in = session.is_logged_in(),
            "Clinic state hydrated"
        );
        Self {
            config,
            clock: Box::new(|| Local::now().naive_local()),
            appointments,
            contacts,
            session,
        }
    }

    /// Opens the SQLite store at `path` and hydrates from it.
    pub fn open(path: &Path, config: ClinicConfig) -> Result<Self, CoreError> {
        let storage: SharedStorage = Arc::new(SqliteStore::open(path)?);
        Ok(Self::hydrate(storage, config))
    }

    /// Opens the store at the default data location.
    pub fn open_default(config: ClinicConfig) -> Result<Self, CoreError> {
        Self::open(&config::store_path(), config)
    }

    /// Replaces the wall clock, e.g. with a fixed instant in tests.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> NaiveDateTime + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    /// `now()` as a UTC instant, for record timestamps and ids. A local
    /// time skipped by a DST change is read as UTC.
    pub fn now_utc(&self) -> DateTime<Utc> {
        let now = self.now();
        Local
            .from_local_datetime(&now)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| now.and_utc())
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    pub fn config(&self) -> &ClinicConfig {
        &self.config
    }

    /// Fails with `NotLoggedIn` unless staff is logged in.
    pub fn require_staff(&self) -> Result<(), CoreError> {
        if self.session.is_logged_in() {
            Ok(())
        } else {
            Err(CoreError::NotLoggedIn)
        }
    }
}
