use serde::{Deserialize, Serialize};

use crate::core_state::ClinicState;
use crate::models::DoctorProfile;

/// Shown for every failed login; does not say which credential was wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub logged_in: bool,
    pub doctor: Option<DoctorProfile>,
}

/// Current session state for the navigation bar and dashboard guard.
pub fn session_status(state: &ClinicState) -> SessionStatus {
    SessionStatus {
        logged_in: state.session.is_logged_in(),
        doctor: state.session.doctor().cloned(),
    }
}

/// Staff login.
pub fn login(
    state: &mut ClinicState,
    username: String,
    password: String,
) -> Result<SessionStatus, String> {
    let ok = state
        .session
        .login(&username, &password)
        .map_err(|e| e.to_string())?;
    if !ok {
        return Err(INVALID_CREDENTIALS.into());
    }
    Ok(session_status(state))
}

pub fn logout(state: &mut ClinicState) -> Result<SessionStatus, String> {
    state.session.logout().map_err(|e| e.to_string())?;
    Ok(session_status(state))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::ClinicConfig;
    use crate::storage::MemoryStore;

    fn state() -> ClinicState {
        ClinicState::hydrate(Arc::new(MemoryStore::new()), ClinicConfig::default())
    }

    #[test]
    fn login_then_logout() {
        let mut state = state();
        let status = login(&mut state, "doctor".into(), "admin123".into()).unwrap();
        assert!(status.logged_in);
        assert_eq!(status.doctor.unwrap().name, "Dr. Deepthi");

        let status = logout(&mut state).unwrap();
        assert!(!status.logged_in);
        assert!(status.doctor.is_none());
    }

    #[test]
    fn failure_message_is_generic() {
        let mut state = state();
        let unknown_user = login(&mut state, "nurse".into(), "admin123".into()).unwrap_err();
        let wrong_password = login(&mut state, "doctor".into(), "letmein".into()).unwrap_err();
        assert_eq!(unknown_user, INVALID_CREDENTIALS);
        assert_eq!(unknown_user, wrong_password);
        assert!(!session_status(&state).logged_in);
    }

    #[test]
    fn padded_username_is_rejected() {
        let mut state = state();
        let err = login(&mut state, "  doctor ".into(), "admin123".into()).unwrap_err();
        assert_eq!(err, INVALID_CREDENTIALS);
        assert!(!session_status(&state).logged_in);
        assert!(session_status(&state).doctor.is_none());
    }

    #[test]
    fn status_serializes_camel_case() {
        let mut state = state();
        let status = login(&mut state, "doctor".into(), "admin123".into()).unwrap();
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["loggedIn"], true);
        assert!(json.get("logged_in").is_none());
    }
}
