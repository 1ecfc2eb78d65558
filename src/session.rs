//! Staff session gate. A single logged-in/logged-out flag.
//!
//! The fixed credential pair is a placeholder, not a security boundary.
//! The persisted `doctorLogin` flag is trusted on startup without
//! re-checking credentials.

use subtle::ConstantTimeEq;

use crate::config::StaffAccount;
use crate::models::DoctorProfile;
use crate::storage::{SharedStorage, StorageError, DOCTOR_LOGIN_KEY};

const LOGGED_IN_FLAG: &str = "true";

pub struct SessionGate {
    storage: SharedStorage,
    account: StaffAccount,
    doctor: Option<DoctorProfile>,
}

impl SessionGate {
    /// Starts logged in iff the persisted flag reads `"true"`.
    pub fn hydrate(storage: SharedStorage, account: StaffAccount) -> Self {
        let logged_in = match storage.get(DOCTOR_LOGIN_KEY) {
            Ok(flag) => flag.as_deref() == Some(LOGGED_IN_FLAG),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read login flag, starting logged out");
                false
            }
        };
        let doctor = logged_in.then(|| DoctorProfile::from(&account));
        Self {
            storage,
            account,
            doctor,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.doctor.is_some()
    }

    pub fn doctor(&self) -> Option<&DoctorProfile> {
        self.doctor.as_ref()
    }

    fn credentials_match(&self, username: &str, password: &str) -> bool {
        // Both comparisons always run
        let user_ok = username.as_bytes().ct_eq(self.account.username.as_bytes());
        let pass_ok = password.as_bytes().ct_eq(self.account.password.as_bytes());
        bool::from(user_ok & pass_ok)
    }

    /// Logs in with the fixed staff credentials.
    ///
    /// Returns `Ok(false)` on mismatch with state unchanged. The flag is
    /// persisted before the in-memory state flips.
    pub fn login(&mut self, username: &str, password: &str) -> Result<bool, StorageError> {
        if !self.credentials_match(username, password) {
            tracing::warn!("Staff login rejected");
            return Ok(false);
        }

        self.storage.set(DOCTOR_LOGIN_KEY, LOGGED_IN_FLAG)?;
        self.doctor = Some(DoctorProfile::from(&self.account));
        tracing::info!("Staff logged in");
        Ok(true)
    }

    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.storage.remove(DOCTOR_LOGIN_KEY)?;
        self.doctor = None;
        tracing::info!("Staff logged out");
        Ok(())
    }
}
