use log::{trace, warn};

use crate::{helpers::host_portion, AuthFailure, CredentialSet};

/// Checks that the caller is calling from the member's allowed address.
///
/// The check is skipped entirely when `allow_ip_check_override` is off. Otherwise the member id must match the
/// configured one (ignoring case) and the caller address must equal the host portion of `allowed_address`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientLocationValidator;

impl ClientLocationValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, memberid: &str, caller_address: &str, credentials: &CredentialSet) -> Result<(), AuthFailure> {
        if !credentials.allow_ip_check_override {
            trace!("🔐️ IP checks are disabled. Allowing {memberid} from {caller_address}.");
            return Ok(());
        }
        let member_matches = memberid.trim().to_uppercase() == credentials.memberid.trim().to_uppercase();
        let allowed_host = host_portion(&credentials.allowed_address);
        let address_matches = caller_address.trim() == allowed_host;
        if member_matches && address_matches {
            trace!("🔐️ {memberid} is calling from its allowed address {caller_address}");
            Ok(())
        } else {
            warn!(
                "🔐️ Denying {memberid} from {caller_address}. Member matches: {member_matches}, address matches: \
                 {address_matches}"
            );
            Err(AuthFailure::ForbiddenAddress)
        }
    }
}
