//! Form validation shared by every booking entry point and the contact page.
//!
//! Validation never fails as an error: it returns the set of field-level
//! messages to show next to each input. An empty set means the form may
//! be submitted. Rules are independent per field and the first failing
//! rule of a field wins.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ClinicConfig;
use crate::models::{AppointmentUpdate, Gender, NewAppointment, NewContactForm};
use crate::slots::{available_slots, TIME_SLOTS};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());

// ═══════════════════════════════════════════
// Types
// ═══════════════════════════════════════════

/// Form inputs that can carry an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FullName,
    Age,
    FatherName,
    Email,
    Contact,
    Address,
    Date,
    TimeSlot,
    ProblemDescription,
    Name,
    Phone,
    Message,
}

/// Field → message map. Ordered by form position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FormField, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Booking form exactly as submitted: free text, unparsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentForm {
    pub full_name: String,
    pub age: String,
    pub gender: Gender,
    pub father_name: String,
    pub email: String,
    pub contact: String,
    pub address: String,
    pub date: String, // YYYY-MM-DD
    pub time_slot: String,
    pub problem_description: String,
}

// ═══════════════════════════════════════════
// Shared rules
// ═══════════════════════════════════════════

/// Whitespace-delimited word count; surrounding blanks are ignored.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// True when exactly `digits` digits remain once every non-digit is removed.
pub fn is_valid_phone(phone: &str, digits: usize) -> bool {
    phone.chars().filter(char::is_ascii_digit).count() == digits
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn parse_age(value: &str, config: &ClinicConfig) -> Option<u32> {
    let age: i64 = value.trim().parse().ok()?;
    let age = u32::try_from(age).ok()?;
    (config.min_age..=config.max_age).contains(&age).then_some(age)
}

fn check_email(errors: &mut ValidationErrors, value: &str) {
    if is_blank(value) {
        errors.insert(FormField::Email, "Email is required");
    } else if !is_valid_email(value) {
        errors.insert(FormField::Email, "Please enter a valid email address");
    }
}

fn check_phone(errors: &mut ValidationErrors, field: FormField, value: &str, config: &ClinicConfig) {
    if is_blank(value) {
        errors.insert(field, "Contact number is required");
    } else if !is_valid_phone(value, config.phone_digits) {
        errors.insert(
            field,
            format!("Please enter a valid {}-digit phone number", config.phone_digits),
        );
    }
}

// ═══════════════════════════════════════════
// Appointment form
// ═══════════════════════════════════════════

/// Validates a booking form against the standard slot catalog.
pub fn validate_appointment(
    form: &AppointmentForm,
    now: NaiveDateTime,
    config: &ClinicConfig,
) -> ValidationErrors {
    let lead = config.booking_lead_minutes;
    validate_appointment_with(form, now, config, |date, now| {
        available_slots(&TIME_SLOTS, date, now, lead)
            .into_iter()
            .map(String::from)
            .collect()
    })
}

/// Validates a booking form with a caller-supplied availability function.
pub fn validate_appointment_with<F>(
    form: &AppointmentForm,
    now: NaiveDateTime,
    config: &ClinicConfig,
    availability: F,
) -> ValidationErrors
where
    F: Fn(Option<NaiveDate>, NaiveDateTime) -> Vec<String>,
{
    let mut errors = ValidationErrors::default();

    if is_blank(&form.full_name) {
        errors.insert(FormField::FullName, "Full name is required");
    }

    if parse_age(&form.age, config).is_none() {
        errors.insert(
            FormField::Age,
            format!(
                "Please enter a valid age between {} and {}",
                config.min_age, config.max_age
            ),
        );
    }

    if is_blank(&form.father_name) {
        errors.insert(FormField::FatherName, "Father's name is required");
    }

    check_email(&mut errors, &form.email);
    check_phone(&mut errors, FormField::Contact, &form.contact, config);

    if is_blank(&form.address) {
        errors.insert(FormField::Address, "Address is required");
    }

    let date = parse_date(&form.date);
    if is_blank(&form.date) {
        errors.insert(FormField::Date, "Appointment date is required");
    } else if date.map_or(true, |d| d < now.date()) {
        errors.insert(FormField::Date, "Please select today or a future date");
    }

    if is_blank(&form.time_slot) {
        errors.insert(FormField::TimeSlot, "Time slot is required");
    } else if !availability(date, now).iter().any(|s| s == &form.time_slot) {
        errors.insert(FormField::TimeSlot, "Selected time slot is no longer available");
    }

    if is_blank(&form.problem_description) {
        errors.insert(FormField::ProblemDescription, "Problem description is required");
    } else if word_count(&form.problem_description) > config.max_description_words {
        errors.insert(
            FormField::ProblemDescription,
            format!(
                "Problem description must be within {} words",
                config.max_description_words
            ),
        );
    }

    errors
}

impl AppointmentForm {
    /// Validates, then converts into typed booking data.
    pub fn into_new_appointment(
        self,
        now: NaiveDateTime,
        config: &ClinicConfig,
    ) -> Result<NewAppointment, ValidationErrors> {
        let errors = validate_appointment(&self, now, config);
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut parse_errors = ValidationErrors::default();
        let age = parse_age(&self.age, config);
        let date = parse_date(&self.date);
        if age.is_none() {
            parse_errors.insert(FormField::Age, "Please enter a valid age");
        }
        if date.is_none() {
            parse_errors.insert(FormField::Date, "Please select today or a future date");
        }
        let (Some(age), Some(date)) = (age, date) else {
            return Err(parse_errors);
        };

        Ok(NewAppointment {
            full_name: self.full_name.trim().to_string(),
            age,
            gender: self.gender,
            father_name: self.father_name.trim().to_string(),
            email: self.email.trim().to_string(),
            contact: self.contact.trim().to_string(),
            address: self.address.trim().to_string(),
            date,
            time_slot: self.time_slot,
            problem_description: self.problem_description.trim().to_string(),
        })
    }
}

// ═══════════════════════════════════════════
// Staff edit
// ═══════════════════════════════════════════

/// Checks the fields present in a staff edit. Absent fields are not
/// checked; dates and slots are not held to same-day availability since
/// staff may reschedule freely within the catalog.
pub fn validate_update(update: &AppointmentUpdate, config: &ClinicConfig) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    let required = [
        (FormField::FullName, &update.full_name, "Full name is required"),
        (FormField::FatherName, &update.father_name, "Father's name is required"),
        (FormField::Address, &update.address, "Address is required"),
        (
            FormField::ProblemDescription,
            &update.problem_description,
            "Problem description is required",
        ),
    ];
    for (field, value, message) in required {
        if value.as_deref().is_some_and(is_blank) {
            errors.insert(field, message);
        }
    }

    if let Some(age) = update.age {
        if !(config.min_age..=config.max_age).contains(&age) {
            errors.insert(
                FormField::Age,
                format!(
                    "Please enter a valid age between {} and {}",
                    config.min_age, config.max_age
                ),
            );
        }
    }
    if let Some(ref email) = update.email {
        check_email(&mut errors, email);
    }
    if let Some(ref contact) = update.contact {
        check_phone(&mut errors, FormField::Contact, contact, config);
    }
    if let Some(ref slot) = update.time_slot {
        if !TIME_SLOTS.iter().any(|s| *s == slot.as_str()) {
            errors.insert(FormField::TimeSlot, "Time slot is not offered by the clinic");
        }
    }
    if let Some(ref description) = update.problem_description {
        if word_count(description) > config.max_description_words {
            errors.insert(
                FormField::ProblemDescription,
                format!(
                    "Problem description must be within {} words",
                    config.max_description_words
                ),
            );
        }
    }

    errors
}

// ═══════════════════════════════════════════
// Contact form
// ═══════════════════════════════════════════

pub fn validate_contact(form: &NewContactForm, config: &ClinicConfig) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if is_blank(&form.name) {
        errors.insert(FormField::Name, "Name is required");
    }
    check_email(&mut errors, &form.email);
    check_phone(&mut errors, FormField::Phone, &form.phone, config);

    if is_blank(&form.message) {
        errors.insert(FormField::Message, "Message is required");
    } else if word_count(&form.message) > config.max_message_words {
        errors.insert(
            FormField::Message,
            format!("Message must be within {} words", config.max_message_words),
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn valid_form() -> AppointmentForm {
        AppointmentForm {
            full_name: "Asha Rao".into(),
            age: "34".into(),
            gender: Gender::Female,
            father_name: "Mohan Rao".into(),
            email: "asha@example.com".into(),
            contact: "(984) 501-2345".into(),
            address: "12 MG Road, Bengaluru".into(),
            date: "2026-10-21".into(),
            time_slot: "11:00 AM".into(),
            problem_description: "Recurring migraine for three months".into(),
        }
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn valid_form_has_no_errors() {
        let errors = validate_appointment(&valid_form(), now(), &ClinicConfig::default());
        assert!(errors.is_empty(), "unexpected errors: {errors}");
    }

    #[test]
    fn empty_form_fails_every_required_field() {
        let errors = validate_appointment(&AppointmentForm::default(), now(), &ClinicConfig::default());
        assert_eq!(errors.len(), 9);
        for field in [
            FormField::FullName,
            FormField::Age,
            FormField::FatherName,
            FormField::Email,
            FormField::Contact,
            FormField::Address,
            FormField::Date,
            FormField::TimeSlot,
            FormField::ProblemDescription,
        ] {
            assert!(errors.contains(field), "missing error for {field:?}");
        }
        assert_eq!(errors.get(FormField::Email), Some("Email is required"));
        assert_eq!(errors.get(FormField::TimeSlot), Some("Time slot is required"));
    }

    #[test]
    fn age_out_of_range_is_the_only_error() {
        let form = AppointmentForm { age: "150".into(), ..valid_form() };
        let errors = validate_appointment(&form, now(), &ClinicConfig::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FormField::Age),
            Some("Please enter a valid age between 1 and 120")
        );
    }

    #[test]
    fn age_boundaries() {
        let config = ClinicConfig::default();
        for (age, ok) in [("1", true), ("120", true), ("0", false), ("121", false), ("-5", false), ("abc", false), (" 42 ", true)] {
            let form = AppointmentForm { age: age.into(), ..valid_form() };
            let errors = validate_appointment(&form, now(), &config);
            assert_eq!(!errors.contains(FormField::Age), ok, "age {age:?}");
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("asha.example.com"));
        assert!(!is_valid_email("asha@example"));
        let form = AppointmentForm { email: "asha@example".into(), ..valid_form() };
        let errors = validate_appointment(&form, now(), &ClinicConfig::default());
        assert_eq!(errors.get(FormField::Email), Some("Please enter a valid email address"));
    }

    #[test]
    fn contact_needs_exactly_ten_digits_whatever_the_formatting() {
        assert!(is_valid_phone("98450-12345", 10));
        assert!(is_valid_phone("(984) 501 2345", 10));
        assert!(!is_valid_phone("98450-1234", 10));
        assert!(!is_valid_phone("+91 98450 12345", 10));
        assert!(!is_valid_phone("phone", 10));

        let form = AppointmentForm { contact: "984-501-234".into(), ..valid_form() };
        let errors = validate_appointment(&form, now(), &ClinicConfig::default());
        assert_eq!(
            errors.get(FormField::Contact),
            Some("Please enter a valid 10-digit phone number")
        );
    }

    #[test]
    fn past_or_unparseable_date_rejected() {
        let config = ClinicConfig::default();
        for date in ["2026-10-18", "19/10/2026", "tomorrow"] {
            let form = AppointmentForm { date: date.into(), ..valid_form() };
            let errors = validate_appointment(&form, now(), &config);
            assert_eq!(
                errors.get(FormField::Date),
                Some("Please select today or a future date"),
                "date {date:?}"
            );
        }
    }

    #[test]
    fn today_is_accepted_at_day_granularity() {
        let late = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let form = AppointmentForm { date: "2026-10-19".into(), ..valid_form() };
        let errors = validate_appointment(&form, late, &ClinicConfig::default());
        assert!(!errors.contains(FormField::Date));
    }

    #[test]
    fn passed_slot_today_is_no_longer_available() {
        let two_pm = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(14, 0, 0).unwrap();
        let form = AppointmentForm {
            date: "2026-10-19".into(),
            time_slot: "2:30 PM".into(),
            ..valid_form()
        };
        let errors = validate_appointment(&form, two_pm, &ClinicConfig::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FormField::TimeSlot),
            Some("Selected time slot is no longer available")
        );
    }

    #[test]
    fn slot_outside_catalog_rejected() {
        let form = AppointmentForm { time_slot: "4:00 PM".into(), ..valid_form() };
        let errors = validate_appointment(&form, now(), &ClinicConfig::default());
        assert!(errors.contains(FormField::TimeSlot));
    }

    #[test]
    fn custom_availability_is_consulted() {
        let form = valid_form();
        let errors = validate_appointment_with(&form, now(), &ClinicConfig::default(), |_, _| {
            vec!["6:00 PM".to_string()]
        });
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(FormField::TimeSlot));
    }

    #[test]
    fn description_word_limit() {
        let config = ClinicConfig::default();
        let at_limit = AppointmentForm { problem_description: words(200), ..valid_form() };
        assert!(validate_appointment(&at_limit, now(), &config).is_empty());

        let over = AppointmentForm { problem_description: words(201), ..valid_form() };
        let errors = validate_appointment(&over, now(), &config);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FormField::ProblemDescription),
            Some("Problem description must be within 200 words")
        );
    }

    #[test]
    fn word_count_ignores_extra_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("  fever \n\t and   cough "), 3);
    }

    #[test]
    fn whitespace_only_name_is_blank() {
        let form = AppointmentForm { full_name: "   ".into(), ..valid_form() };
        let errors = validate_appointment(&form, now(), &ClinicConfig::default());
        assert_eq!(errors.get(FormField::FullName), Some("Full name is required"));
    }

    #[test]
    fn converts_valid_form() {
        let appt = valid_form().into_new_appointment(now(), &ClinicConfig::default()).unwrap();
        assert_eq!(appt.age, 34);
        assert_eq!(appt.date, NaiveDate::from_ymd_opt(2026, 10, 21).unwrap());
        assert_eq!(appt.gender, Gender::Female);
        assert_eq!(appt.time_slot, "11:00 AM");
    }

    #[test]
    fn conversion_returns_field_errors() {
        let form = AppointmentForm { email: "".into(), ..valid_form() };
        let errors = form.into_new_appointment(now(), &ClinicConfig::default()).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FormField::Email]);
    }

    #[test]
    fn errors_serialize_as_field_map() {
        let form = AppointmentForm { full_name: "".into(), ..valid_form() };
        let errors = validate_appointment(&form, now(), &ClinicConfig::default());
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["fullName"], "Full name is required");
    }

    #[test]
    fn staff_edit_checks_only_present_fields() {
        let config = ClinicConfig::default();
        assert!(validate_update(&AppointmentUpdate::default(), &config).is_empty());

        let ok = AppointmentUpdate {
            contact: Some("98450 12399".into()),
            time_slot: Some("8:30 PM".into()),
            age: Some(120),
            ..Default::default()
        };
        assert!(validate_update(&ok, &config).is_empty());

        let bad = AppointmentUpdate {
            full_name: Some("  ".into()),
            age: Some(0),
            email: Some("nobody".into()),
            time_slot: Some("9:00 PM".into()),
            problem_description: Some(words(201)),
            ..Default::default()
        };
        let errors = validate_update(&bad, &config);
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![
                FormField::FullName,
                FormField::Age,
                FormField::Email,
                FormField::TimeSlot,
                FormField::ProblemDescription,
            ]
        );
    }

    #[test]
    fn contact_form_rules() {
        let config = ClinicConfig::default();
        let valid = NewContactForm {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            phone: "9845012345".into(),
            message: "Do you treat eczema in children?".into(),
        };
        assert!(validate_contact(&valid, &config).is_empty());

        let errors = validate_contact(&NewContactForm::default(), &config);
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(FormField::Phone));

        let long = NewContactForm { message: words(301), ..valid.clone() };
        assert_eq!(
            validate_contact(&long, &config).get(FormField::Message),
            Some("Message must be within 300 words")
        );
        let at_limit = NewContactForm { message: words(300), ..valid };
        assert!(validate_contact(&at_limit, &config).is_empty());
    }
}
