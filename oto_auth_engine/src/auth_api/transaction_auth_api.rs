use std::fmt::Debug;

use log::{debug, trace};

use crate::{
    helpers::{constant_time_eq_ignore_case, SignatureCodec},
    validators::{ClientLocationValidator, CredentialValidator, SignatureValidator},
    AuthFailure,
    AuthSuccess,
    CredentialProvider,
    ProofMode,
    TransactionAuthError,
    TransactionAuthRequest,
};

/// Runs the authentication pipeline for a transaction request.
///
/// The checks run in a fixed order and the first failure wins:
/// 1. The caller location (IP allow-list), regardless of proof mode.
/// 2. The proof:
///    * pin + password: the pair must match the configured credentials. The signature is then computed from the
///      *supplied* pair, and if the caller also sent a signature the two must agree (ignoring case). The computed
///      signature is returned.
///    * signature only: the signature is recomputed from the *configured* pin and password and compared in constant
///      time. The caller's signature is returned unmodified.
///
/// The API holds no mutable state, so one instance can serve any number of concurrent callers.
#[derive(Clone)]
pub struct TransactionAuthApi<B> {
    provider: B,
    location: ClientLocationValidator,
    credentials: CredentialValidator,
    signature: SignatureValidator,
}

impl<B: Debug> Debug for TransactionAuthApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TransactionAuthApi ({:?})", self.provider)
    }
}

impl<B> TransactionAuthApi<B> {
    pub fn new(provider: B) -> Self {
        Self::with_validators(
            provider,
            ClientLocationValidator::new(),
            CredentialValidator::new(),
            SignatureValidator::new(),
        )
    }

    pub fn with_validators(
        provider: B,
        location: ClientLocationValidator,
        credentials: CredentialValidator,
        signature: SignatureValidator,
    ) -> Self {
        Self { provider, location, credentials, signature }
    }

    pub fn provider(&self) -> &B {
        &self.provider
    }
}

impl<B> TransactionAuthApi<B>
where B: CredentialProvider
{
    pub fn authenticate_transaction(
        &self,
        request: &TransactionAuthRequest,
        caller_address: &str,
    ) -> Result<AuthSuccess, TransactionAuthError> {
        let config = self.provider.credentials()?;
        let request = request.normalized();
        let TransactionAuthRequest { trxid, memberid, dest, product, .. } = &request;
        debug!("🔐️ Authenticating transaction {trxid} for {memberid} from {caller_address}");

        self.location.validate(memberid, caller_address, &config)?;
        trace!("🔐️ Location check passed for {memberid}");

        let signature = match request.proof_mode()? {
            ProofMode::PinPassword { pin, password, signature } => {
                self.credentials.validate(memberid, &pin, &password, &config)?;
                let expected = SignatureCodec::compute(memberid, product, dest, trxid, &pin, &password);
                if let Some(supplied) = signature {
                    if !constant_time_eq_ignore_case(&supplied, &expected) {
                        debug!("🔐️ Signature sent alongside pin/password for {trxid} does not match. Got {supplied}");
                        return Err(AuthFailure::SignatureMismatch.into());
                    }
                }
                expected
            },
            ProofMode::Signature(supplied) => {
                self.signature.validate(
                    memberid,
                    product,
                    dest,
                    trxid,
                    &supplied,
                    config.pin.reveal(),
                    config.password.reveal(),
                )?;
                supplied
            },
        };
        debug!("🔐️ Transaction {trxid} for {memberid} authenticated");
        Ok(AuthSuccess::new(request.trxid.clone(), request.memberid.clone(), signature))
    }
}
