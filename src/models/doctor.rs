use serde::{Deserialize, Serialize};

use crate::config::StaffAccount;

/// Display profile of the logged-in doctor. Carries no credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub name: String,
    pub qualification: String,
}

impl From<&StaffAccount> for DoctorProfile {
    fn from(account: &StaffAccount) -> Self {
        Self {
            name: account.name.clone(),
            qualification: account.qualification.clone(),
        }
    }
}
