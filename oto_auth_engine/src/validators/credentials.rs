use log::{debug, trace};

use crate::{helpers::constant_time_eq, AuthFailure, CredentialSet};

/// Checks a caller-supplied pin and password against the configured pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialValidator;

impl CredentialValidator {
    pub fn new() -> Self {
        Self
    }

    /// Both values must match exactly (case-sensitive). The member id is only used for logging: matching the member is
    /// the location check's job.
    pub fn validate(
        &self,
        memberid: &str,
        pin: &str,
        password: &str,
        credentials: &CredentialSet,
    ) -> Result<(), AuthFailure> {
        let pin_ok = constant_time_eq(pin, credentials.pin.reveal());
        let password_ok = constant_time_eq(password, credentials.password.reveal());
        // Non-short-circuiting: both comparisons always run
        if pin_ok & password_ok {
            trace!("🔐️ Pin and password accepted for {memberid}");
            Ok(())
        } else {
            debug!("🔐️ Pin or password rejected for {memberid}");
            Err(AuthFailure::BadCredentials)
        }
    }
}
