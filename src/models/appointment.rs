use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{AppointmentStatus, Gender};

/// One booking request, as stored under the `appointments` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub full_name: String,
    pub age: u32,
    pub gender: Gender,
    pub father_name: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub problem_description: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Typed booking data produced from a validated form. Status and
/// identity are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub full_name: String,
    pub age: u32,
    pub gender: Gender,
    pub father_name: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub problem_description: String,
}

/// Staff edit of an existing appointment. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentUpdate {
    pub full_name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub father_name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub problem_description: Option<String>,
}

impl Appointment {
    pub fn from_new(id: String, data: NewAppointment, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            full_name: data.full_name,
            age: data.age,
            gender: data.gender,
            father_name: data.father_name,
            email: data.email,
            contact: data.contact,
            address: data.address,
            date: data.date,
            time_slot: data.time_slot,
            problem_description: data.problem_description,
            status: AppointmentStatus::Pending,
            created_at,
        }
    }
}

impl AppointmentUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the present fields into `target`.
    pub fn apply_to(&self, target: &mut Appointment) {
        if let Some(ref v) = self.full_name {
            target.full_name = v.clone();
        }
        if let Some(v) = self.age {
            target.age = v;
        }
        if let Some(v) = self.gender {
            target.gender = v;
        }
        if let Some(ref v) = self.father_name {
            target.father_name = v.clone();
        }
        if let Some(ref v) = self.email {
            target.email = v.clone();
        }
        if let Some(ref v) = self.contact {
            target.contact = v.clone();
        }
        if let Some(ref v) = self.address {
            target.address = v.clone();
        }
        if let Some(v) = self.date {
            target.date = v;
        }
        if let Some(ref v) = self.time_slot {
            target.time_slot = v.clone();
        }
        if let Some(ref v) = self.problem_description {
            target.problem_description = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Appointment {
        Appointment::from_new(
            "1760870400000".into(),
            NewAppointment {
                full_name: "Asha Rao".into(),
                age: 34,
                gender: Gender::Female,
                father_name: "Mohan Rao".into(),
                email: "asha@example.com".into(),
                contact: "98450 12345".into(),
                address: "12 MG Road, Bengaluru".into(),
                date: NaiveDate::from_ymd_opt(2026, 10, 21).unwrap(),
                time_slot: "11:00 AM".into(),
                problem_description: "Recurring migraine".into(),
            },
            NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(9, 15, 0)
                .unwrap()
                .and_utc(),
        )
    }

    #[test]
    fn new_appointment_starts_pending() {
        assert_eq!(sample().status, AppointmentStatus::Pending);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["fullName"], "Asha Rao");
        assert_eq!(json["fatherName"], "Mohan Rao");
        assert_eq!(json["timeSlot"], "11:00 AM");
        assert_eq!(json["date"], "2026-10-21");
        assert_eq!(json["status"], "pending");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn update_merges_only_present_fields() {
        let mut appt = sample();
        let update = AppointmentUpdate {
            contact: Some("9845012399".into()),
            time_slot: Some("6:30 PM".into()),
            ..Default::default()
        };
        update.apply_to(&mut appt);

        assert_eq!(appt.contact, "9845012399");
        assert_eq!(appt.time_slot, "6:30 PM");
        assert_eq!(appt.full_name, "Asha Rao");
        assert_eq!(appt.status, AppointmentStatus::Pending);
    }

    #[test]
    fn empty_update_detected() {
        assert!(AppointmentUpdate::default().is_empty());
        let update: AppointmentUpdate = serde_json::from_str(r#"{"age": 40}"#).unwrap();
        assert!(!update.is_empty());
        assert_eq!(update.age, Some(40));
    }
}
