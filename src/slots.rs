//! Bookable time slots: fixed catalog, same-day availability filter and
//! morning/evening grouping.
//!
//! All functions are pure: the caller supplies `now` (local wall-clock
//! time) so results are deterministic and testable.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::models::SlotSession;

/// The clinic's slot catalog, in display order.
pub const TIME_SLOTS: [&str; 16] = [
    "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
    "12:00 PM", "12:30 PM", "1:00 PM", "1:30 PM", "2:00 PM", "2:30 PM",
    "6:00 PM", "6:30 PM", "7:00 PM", "7:30 PM", "8:00 PM", "8:30 PM",
];

/// Slots starting before 3 PM belong to the morning session.
const MORNING_SESSION_END_MINUTES: u32 = 15 * 60;

/// Converts a 12-hour "H:MM AM/PM" label to minutes since midnight.
/// 12:00 PM is noon (720), 12:00 AM is midnight (0).
pub fn slot_minutes(label: &str) -> Option<u32> {
    let (time, period) = label.trim().split_once(' ')?;
    let (hours, minutes) = time.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if !(1..=12).contains(&hours) || minutes >= 60 {
        return None;
    }

    let hours = match (period.trim(), hours) {
        ("AM", 12) => 0,
        ("AM", h) => h,
        ("PM", 12) => 12,
        ("PM", h) => h + 12,
        _ => return None,
    };
    Some(hours * 60 + minutes)
}

/// Slots still bookable for `selected_date` as of `now`.
///
/// Without a date, or for any day other than today, the whole catalog is
/// returned in order. For today only slots starting strictly later than
/// `now + lead_minutes` survive; a slot exactly `lead_minutes` ahead is
/// excluded. Labels that cannot be parsed never survive the filter.
pub fn available_slots<'a>(
    catalog: &[&'a str],
    selected_date: Option<NaiveDate>,
    now: NaiveDateTime,
    lead_minutes: u32,
) -> Vec<&'a str> {
    let Some(date) = selected_date else {
        return catalog.to_vec();
    };
    if date != now.date() {
        return catalog.to_vec();
    }

    let cutoff = now.hour() * 60 + now.minute() + lead_minutes;
    catalog
        .iter()
        .copied()
        .filter(|slot| slot_minutes(slot).is_some_and(|m| m > cutoff))
        .collect()
}

/// Keeps a previously chosen slot after the date changes, or drops it
/// when it is no longer bookable for `new_date`.
pub fn reconcile_slot(
    selected_slot: Option<&str>,
    new_date: Option<NaiveDate>,
    now: NaiveDateTime,
    lead_minutes: u32,
) -> Option<String> {
    let slot = selected_slot.filter(|s| !s.is_empty())?;
    let available = available_slots(&TIME_SLOTS, new_date, now, lead_minutes);
    if available.iter().any(|s| *s == slot) {
        Some(slot.to_string())
    } else {
        tracing::debug!(slot, "Selected slot dropped after date change");
        None
    }
}

/// Earliest date the booking form accepts.
pub fn min_booking_date(now: NaiveDateTime) -> NaiveDate {
    now.date()
}

/// Which consultation session a slot belongs to.
pub fn session_of(label: &str) -> Option<SlotSession> {
    let minutes = slot_minutes(label)?;
    if minutes < MORNING_SESSION_END_MINUTES {
        Some(SlotSession::Morning)
    } else {
        Some(SlotSession::Evening)
    }
}

/// Slots split into the two sessions shown by the booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSlots {
    pub morning: Vec<String>,
    pub evening: Vec<String>,
}

pub fn slots_by_session(slots: &[&str]) -> SessionSlots {
    let mut grouped = SessionSlots::default();
    for slot in slots {
        match session_of(slot) {
            Some(SlotSession::Morning) => grouped.morning.push(slot.to_string()),
            Some(SlotSession::Evening) => grouped.evening.push(slot.to_string()),
            None => {}
        }
    }
    grouped
}
