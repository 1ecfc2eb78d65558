use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact-page message. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    pub fn from_new(id: String, data: NewContactForm, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: data.name,
            email: data.email,
            phone: data.phone,
            message: data.message,
            created_at,
        }
    }
}
