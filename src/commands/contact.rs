//! Contact-page command.

use super::FormOutcome;
use crate::core_state::ClinicState;
use crate::models::{ContactForm, NewContactForm};
use crate::validation::validate_contact;

/// Validates and stores a contact-page message.
pub fn submit_contact_form(
    state: &mut ClinicState,
    form: NewContactForm,
) -> Result<FormOutcome<ContactForm>, String> {
    let errors = validate_contact(&form, state.config());
    if !errors.is_empty() {
        return Ok(FormOutcome::Rejected { errors });
    }

    let form = NewContactForm {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        message: form.message.trim().to_string(),
    };
    let created_at = state.now_utc();
    let record = state.contacts.add(form, created_at).map_err(|e| e.to_string())?;
    Ok(FormOutcome::Accepted { record })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::ClinicConfig;
    use crate::storage::MemoryStore;
    use crate::validation::FormField;

    fn state() -> ClinicState {
        ClinicState::hydrate(Arc::new(MemoryStore::new()), ClinicConfig::default())
    }

    #[test]
    fn stores_trimmed_message() {
        let mut state = state();
        let outcome = submit_contact_form(
            &mut state,
            NewContactForm {
                name: "  Ravi ".into(),
                email: "ravi@example.com".into(),
                phone: "98450 12345".into(),
                message: "Are you open on Sunday?\n".into(),
            },
        )
        .unwrap();

        let FormOutcome::Accepted { record } = outcome else {
            panic!("expected accepted message");
        };
        assert_eq!(record.name, "Ravi");
        assert_eq!(record.message, "Are you open on Sunday?");
        assert_eq!(state.contacts.len(), 1);
    }

    #[test]
    fn invalid_message_is_not_stored() {
        let mut state = state();
        let outcome = submit_contact_form(
            &mut state,
            NewContactForm {
                name: "Ravi".into(),
                email: "ravi-at-example".into(),
                phone: "12345".into(),
                message: "Hello".into(),
            },
        )
        .unwrap();

        let FormOutcome::Rejected { errors } = outcome else {
            panic!("expected rejection");
        };
        assert!(errors.contains(FormField::Email));
        assert!(errors.contains(FormField::Phone));
        assert!(state.contacts.is_empty());
    }
}
