//! Patient-facing booking commands.
//!
//! Three commands:
//! - `available_slots`: bookable slots for a date, grouped by session
//! - `reconcile_slot`: keep or drop the chosen slot after a date change
//! - `book_appointment`: validate the form and store the booking

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::FormOutcome;
use crate::core_state::ClinicState;
use crate::models::Appointment;
use crate::slots::{self, SessionSlots, TIME_SLOTS};
use crate::validation::AppointmentForm;

/// Slot picker contents for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotOptions {
    pub min_date: String, // YYYY-MM-DD
    pub slots: Vec<String>,
    pub sessions: SessionSlots,
}

fn parse_optional_date(date: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        None => Ok(None),
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| "Invalid date format. Use YYYY-MM-DD".to_string()),
    }
}

/// Lists the slots still bookable for `date` (full catalog when unset).
pub fn available_slots(state: &ClinicState, date: Option<String>) -> Result<SlotOptions, String> {
    let date = parse_optional_date(date.as_deref())?;
    let now = state.now();
    let available = slots::available_slots(
        &TIME_SLOTS,
        date,
        now,
        state.config().booking_lead_minutes,
    );

    Ok(SlotOptions {
        min_date: slots::min_booking_date(now).to_string(),
        sessions: slots::slots_by_session(&available),
        slots: available.into_iter().map(String::from).collect(),
    })
}

/// Returns the slot to keep selected after the date changed to `new_date`.
pub fn reconcile_slot(
    state: &ClinicState,
    selected_slot: Option<String>,
    new_date: Option<String>,
) -> Result<Option<String>, String> {
    let date = parse_optional_date(new_date.as_deref())?;
    Ok(slots::reconcile_slot(
        selected_slot.as_deref(),
        date,
        state.now(),
        state.config().booking_lead_minutes,
    ))
}

/// Validates and books. Field errors come back as `Rejected`; only storage
/// failures are `Err`.
pub fn book_appointment(
    state: &mut ClinicState,
    form: AppointmentForm,
) -> Result<FormOutcome<Appointment>, String> {
    let now = state.now();
    let data = match form.into_new_appointment(now, state.config()) {
        Ok(data) => data,
        Err(errors) => {
            tracing::debug!(fields = errors.len(), "Booking form rejected");
            return Ok(FormOutcome::Rejected { errors });
        }
    };

    let (date, slot) = (data.date, data.time_slot.clone());
    let created_at = state.now_utc();
    let appointment = state
        .appointments
        .add(data, created_at)
        .map_err(|e| e.to_string())?;

    let sharing = state.appointments.bookings_for_slot(date, &slot);
    if sharing > 1 {
        tracing::warn!(%date, slot, bookings = sharing, "Slot double-booked");
    }

    Ok(FormOutcome::Accepted {
        record: appointment,
    })
}
