//! Appointment store: the in-memory booking list and its persistence.
//!
//! Every mutation rewrites the whole collection under the `appointments`
//! key immediately after the in-memory change. When that write fails the
//! in-memory change is rolled back, so memory and storage never diverge.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::IdGenerator;
use crate::models::{Appointment, AppointmentStatus, AppointmentUpdate, NewAppointment};
use crate::storage::{self, SharedStorage, StorageError, APPOINTMENTS_KEY};

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Cannot cancel appointment on the same day (scheduled for {date})")]
    SameDayCancellation { date: NaiveDate },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Headline numbers for the staff dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentStats {
    pub total: usize,
    pub today: usize,
    pub pending: usize,
    pub completed: usize,
    pub cancelled: usize,
}

pub struct AppointmentStore {
    storage: SharedStorage,
    appointments: Vec<Appointment>,
    ids: IdGenerator,
}

impl AppointmentStore {
    /// Rehydrates from storage. Absent or unparseable data gives an empty list.
    pub fn hydrate(storage: SharedStorage) -> Self {
        let appointments: Vec<Appointment> =
            storage::load_json_or_default(storage.as_ref(), APPOINTMENTS_KEY);
        let ids = IdGenerator::resume_after(appointments.iter().map(|a| a.id.as_str()));
        tracing::debug!(count = appointments.len(), "Appointments rehydrated");
        Self {
            storage,
            appointments,
            ids,
        }
    }

    fn persist(&self) -> Result<(), StorageError> {
        storage::save_json(self.storage.as_ref(), APPOINTMENTS_KEY, &self.appointments)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.appointments.iter().position(|a| a.id == id)
    }

    /// Replaces the record at `idx`, persists, and restores the previous
    /// record if the write fails.
    fn replace_at(&mut self, idx: usize, updated: Appointment) -> Result<(), StorageError> {
        let previous = std::mem::replace(&mut self.appointments[idx], updated);
        if let Err(e) = self.persist() {
            self.appointments[idx] = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Books a new appointment. The record always starts `pending`.
    pub fn add(
        &mut self,
        data: NewAppointment,
        now: DateTime<Utc>,
    ) -> Result<Appointment, AppointmentError> {
        let id = self.ids.next_id(now);
        let appointment = Appointment::from_new(id, data, now);
        self.appointments.push(appointment.clone());

        if let Err(e) = self.persist() {
            self.appointments.pop();
            return Err(e.into());
        }

        tracing::info!(
            id = %appointment.id,
            date = %appointment.date,
            slot = %appointment.time_slot,
            "Appointment booked"
        );
        Ok(appointment)
    }

    /// Sets the status of `id`. Returns `false` (and writes nothing) when
    /// no such appointment exists.
    pub fn update_status(
        &mut self,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<bool, AppointmentError> {
        let Some(idx) = self.position(id) else {
            tracing::debug!(id, "Status change for unknown appointment ignored");
            return Ok(false);
        };

        let mut updated = self.appointments[idx].clone();
        let from = updated.status;
        updated.status = status;
        self.replace_at(idx, updated)?;

        tracing::info!(id, %from, to = %status, "Appointment status changed");
        Ok(true)
    }

    /// Merges the present fields of `changes` into `id`. Returns `false`
    /// when no such appointment exists.
    pub fn update(&mut self, id: &str, changes: &AppointmentUpdate) -> Result<bool, AppointmentError> {
        let Some(idx) = self.position(id) else {
            tracing::debug!(id, "Edit for unknown appointment ignored");
            return Ok(false);
        };

        let mut updated = self.appointments[idx].clone();
        changes.apply_to(&mut updated);
        self.replace_at(idx, updated)?;

        tracing::info!(id, "Appointment edited");
        Ok(true)
    }

    /// Cancels `id` unless its date is `today` or earlier.
    ///
    /// Unknown ids are ignored (`Ok(false)`). A same-day or past
    /// appointment is refused with `SameDayCancellation` and left untouched.
    pub fn cancel(&mut self, id: &str, today: NaiveDate) -> Result<bool, AppointmentError> {
        let Some(appointment) = self.get(id) else {
            return Ok(false);
        };
        if appointment.date <= today {
            let date = appointment.date;
            tracing::warn!(id, %date, "Same-day cancellation refused");
            return Err(AppointmentError::SameDayCancellation { date });
        }
        self.update_status(id, AppointmentStatus::Cancelled)
    }

    /// Appointments dated `today` that are not cancelled, in booking order.
    pub fn todays_appointments(&self, today: NaiveDate) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.date == today && a.status != AppointmentStatus::Cancelled)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    /// All appointments in booking order.
    pub fn all(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    /// Non-cancelled appointments sharing `date` and `slot`. Double
    /// bookings are accepted, this only reports them.
    pub fn bookings_for_slot(&self, date: NaiveDate, slot: &str) -> usize {
        self.appointments
            .iter()
            .filter(|a| {
                a.date == date && a.time_slot == slot && a.status != AppointmentStatus::Cancelled
            })
            .count()
    }

    pub fn stats(&self, today: NaiveDate) -> AppointmentStats {
        let count = |status| self.appointments.iter().filter(|a| a.status == status).count();
        AppointmentStats {
            total: self.appointments.len(),
            today: self.todays_appointments(today).len(),
            pending: count(AppointmentStatus::Pending),
            completed: count(AppointmentStatus::Completed),
            cancelled: count(AppointmentStatus::Cancelled),
        }
    }
}
