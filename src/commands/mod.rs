//! Command layer: plain functions over `ClinicState`.
//!
//! Commands return `Result<T, String>` so any front end can surface the
//! message directly. Form submissions that fail validation are not errors:
//! they return `FormOutcome::Rejected` with per-field messages.

pub mod auth;
pub mod booking;
pub mod contact;
pub mod dashboard;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationErrors;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FormOutcome<T> {
    Accepted { record: T },
    Rejected { errors: ValidationErrors },
}

impl<T> FormOutcome<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}
