//! Staff dashboard commands. Every command here requires a logged-in
//! session and fails with "Not logged in" otherwise.

use serde::{Deserialize, Serialize};

use crate::appointments::AppointmentStats;
use crate::core_state::{ClinicState, CoreError};
use crate::models::{Appointment, AppointmentStatus, AppointmentUpdate, ContactForm, DoctorProfile};
use crate::validation::validate_update;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub doctor: Option<DoctorProfile>,
    pub stats: AppointmentStats,
    pub todays_appointments: Vec<Appointment>,
    pub contact_forms: usize,
}

fn gate(state: &ClinicState) -> Result<(), String> {
    state.require_staff().map_err(|e| e.to_string())
}

pub fn dashboard_summary(state: &ClinicState) -> Result<DashboardSummary, String> {
    gate(state)?;
    let today = state.today();
    Ok(DashboardSummary {
        doctor: state.session.doctor().cloned(),
        stats: state.appointments.stats(today),
        todays_appointments: state
            .appointments
            .todays_appointments(today)
            .into_iter()
            .cloned()
            .collect(),
        contact_forms: state.contacts.len(),
    })
}

/// Today's non-cancelled appointments, in booking order.
pub fn todays_appointments(state: &ClinicState) -> Result<Vec<Appointment>, String> {
    gate(state)?;
    Ok(state
        .appointments
        .todays_appointments(state.today())
        .into_iter()
        .cloned()
        .collect())
}

pub fn list_appointments(state: &ClinicState) -> Result<Vec<Appointment>, String> {
    gate(state)?;
    Ok(state.appointments.all().to_vec())
}

pub fn list_contact_forms(state: &ClinicState) -> Result<Vec<ContactForm>, String> {
    gate(state)?;
    Ok(state.contacts.all().to_vec())
}

fn checked_transition(
    state: &ClinicState,
    id: &str,
    to: AppointmentStatus,
) -> Result<(), CoreError> {
    state.require_staff()?;
    let appointment = state
        .appointments
        .get(id)
        .ok_or_else(|| CoreError::AppointmentNotFound(id.to_string()))?;
    if !appointment.status.can_transition_to(to) {
        return Err(CoreError::InvalidTransition {
            from: appointment.status,
            to,
        });
    }
    Ok(())
}

/// Marks a pending appointment as completed.
pub fn mark_completed(state: &mut ClinicState, id: String) -> Result<Appointment, String> {
    checked_transition(state, &id, AppointmentStatus::Completed).map_err(|e| e.to_string())?;
    state
        .appointments
        .update_status(&id, AppointmentStatus::Completed)
        .map_err(|e| e.to_string())?;
    current(state, &id)
}

/// Cancels a pending appointment. Refused for today's or past dates.
pub fn cancel_appointment(state: &mut ClinicState, id: String) -> Result<Appointment, String> {
    checked_transition(state, &id, AppointmentStatus::Cancelled).map_err(|e| e.to_string())?;
    let today = state.today();
    state
        .appointments
        .cancel(&id, today)
        .map_err(|e| e.to_string())?;
    current(state, &id)
}

/// Applies a staff edit. Status, id and creation time are not editable.
pub fn edit_appointment(
    state: &mut ClinicState,
    id: String,
    changes: AppointmentUpdate,
) -> Result<Appointment, String> {
    gate(state)?;
    if state.appointments.get(&id).is_none() {
        return Err(CoreError::AppointmentNotFound(id).to_string());
    }
    if changes.is_empty() {
        return Err("No changes to apply".into());
    }

    let errors = validate_update(&changes, state.config());
    if !errors.is_empty() {
        return Err(CoreError::Validation(errors).to_string());
    }

    state
        .appointments
        .update(&id, &changes)
        .map_err(|e| e.to_string())?;
    current(state, &id)
}

fn current(state: &ClinicState, id: &str) -> Result<Appointment, String> {
    state
        .appointments
        .get(id)
        .cloned()
        .ok_or_else(|| CoreError::AppointmentNotFound(id.to_string()).to_string())
}
