//! Contact-message store. Append-only; messages are never edited.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::ids::IdGenerator;
use crate::models::{ContactForm, NewContactForm};
use crate::storage::{self, SharedStorage, StorageError, CONTACT_FORMS_KEY};

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct ContactStore {
    storage: SharedStorage,
    forms: Vec<ContactForm>,
    ids: IdGenerator,
}

impl ContactStore {
    pub fn hydrate(storage: SharedStorage) -> Self {
        let forms: Vec<ContactForm> =
            storage::load_json_or_default(storage.as_ref(), CONTACT_FORMS_KEY);
        let ids = IdGenerator::resume_after(forms.iter().map(|f| f.id.as_str()));
        tracing::debug!(count = forms.len(), "Contact forms rehydrated");
        Self { storage, forms, ids }
    }

    pub fn add(&mut self, data: NewContactForm, now: DateTime<Utc>) -> Result<ContactForm, ContactError> {
        let form = ContactForm::from_new(self.ids.next_id(now), data, now);
        self.forms.push(form.clone());

        if let Err(e) = storage::save_json(self.storage.as_ref(), CONTACT_FORMS_KEY, &self.forms) {
            self.forms.pop();
            return Err(e.into());
        }

        tracing::info!(id = %form.id, "Contact form received");
        Ok(form)
    }

    /// All messages in arrival order.
    pub fn all(&self) -> &[ContactForm] {
        &self.forms
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}
