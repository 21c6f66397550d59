use log::{debug, trace};

use crate::{
    helpers::{constant_time_eq, SignatureCodec},
    AuthFailure,
};

/// Checks a supplied signature by recomputing it from the transaction fields and a pin/password pair.
///
/// In signature-only mode the gateway passes the *configured* pin and password, so a matching signature proves the
/// caller knows the shared secret without ever sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureValidator;

impl SignatureValidator {
    pub fn new() -> Self {
        Self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn validate(
        &self,
        memberid: &str,
        product: &str,
        dest: &str,
        trxid: &str,
        supplied_signature: &str,
        pin: &str,
        password: &str,
    ) -> Result<(), AuthFailure> {
        let expected = SignatureCodec::compute(memberid, product, dest, trxid, pin, password);
        if constant_time_eq(supplied_signature, &expected) {
            trace!("🔐️ Signature for {memberid}/{trxid} is valid");
            Ok(())
        } else {
            debug!("🔐️ Signature for {memberid}/{trxid} is invalid. Supplied: {supplied_signature}");
            Err(AuthFailure::BadSignature)
        }
    }
}
