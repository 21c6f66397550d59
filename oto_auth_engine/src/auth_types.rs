use std::fmt::{self, Debug};

use oto_common::Secret;
use serde::{Deserialize, Serialize};

use crate::AuthFailure;

//--------------------------------------   TransactionAuthRequest   ---------------------------------------------------
/// An inbound transaction request, exactly as the caller supplied it.
///
/// The caller proves its identity with either a `pin` + `password` pair, or a precomputed `sign`ature (or both, in
/// which case the pin/password pair takes priority and the signature becomes a consistency check). Use
/// [`TransactionAuthRequest::proof_mode`] to turn the optional fields into a [`ProofMode`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionAuthRequest {
    pub trxid: String,
    pub memberid: String,
    pub dest: String,
    pub product: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, rename = "sign", skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl TransactionAuthRequest {
    pub fn new<S: Into<String>>(trxid: S, memberid: S, dest: S, product: S) -> Self {
        Self {
            trxid: trxid.into(),
            memberid: memberid.into(),
            dest: dest.into(),
            product: product.into(),
            ..Default::default()
        }
    }

    pub fn with_pin_password<S: Into<String>>(mut self, pin: S, password: S) -> Self {
        self.pin = Some(pin.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_signature<S: Into<String>>(mut self, signature: S) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Returns a copy of this request with the surrounding whitespace stripped from every field. Casing is left alone;
    /// case folding of the member id and product code happens where they are compared or signed.
    pub fn normalized(&self) -> Self {
        let trim = |s: &String| s.trim().to_string();
        Self {
            trxid: trim(&self.trxid),
            memberid: trim(&self.memberid),
            dest: trim(&self.dest),
            product: trim(&self.product),
            pin: self.pin.as_ref().map(trim),
            password: self.password.as_ref().map(trim),
            signature: self.signature.as_ref().map(trim),
        }
    }

    /// True if the request carries enough fields to attempt authentication at all.
    pub fn has_proof(&self) -> bool {
        self.proof_mode().is_ok()
    }

    /// Determine which proof mode the caller used.
    ///
    /// A pin without a password (or vice versa) does not count as pin authentication. If there is no complete pair and
    /// no signature, [`AuthFailure::MissingProof`] is returned.
    pub fn proof_mode(&self) -> Result<ProofMode, AuthFailure> {
        match (&self.pin, &self.password, &self.signature) {
            (Some(pin), Some(password), signature) => Ok(ProofMode::PinPassword {
                pin: pin.clone(),
                password: password.clone(),
                signature: signature.clone(),
            }),
            (_, _, Some(signature)) => Ok(ProofMode::Signature(signature.clone())),
            _ => Err(AuthFailure::MissingProof),
        }
    }
}

impl Debug for TransactionAuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "****");
        f.debug_struct("TransactionAuthRequest")
            .field("trxid", &self.trxid)
            .field("memberid", &self.memberid)
            .field("dest", &self.dest)
            .field("product", &self.product)
            .field("pin", &redact(&self.pin))
            .field("password", &redact(&self.password))
            .field("signature", &self.signature)
            .finish()
    }
}

//--------------------------------------        ProofMode           ---------------------------------------------------
/// How the caller proved its identity.
#[derive(Clone, PartialEq, Eq)]
pub enum ProofMode {
    /// The shared pin and password. An accompanying signature must agree with the one computed from this pair.
    PinPassword { pin: String, password: String, signature: Option<String> },
    /// A precomputed signature only.
    Signature(String),
}

impl Debug for ProofMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinPassword { signature, .. } => f
                .debug_struct("PinPassword")
                .field("pin", &"****")
                .field("password", &"****")
                .field("signature", signature)
                .finish(),
            Self::Signature(s) => f.debug_tuple("Signature").field(s).finish(),
        }
    }
}

//--------------------------------------      CredentialSet         ---------------------------------------------------
/// The single trusted identity a gateway deployment authenticates against.
#[derive(Debug, Clone, Default)]
pub struct CredentialSet {
    pub memberid: String,
    pub pin: Secret<String>,
    pub password: Secret<String>,
    /// The address the member is allowed to call from. May carry a `:port` suffix, which is ignored.
    pub allowed_address: String,
    /// Where transaction reports for this member are delivered. Not used during authentication.
    pub report_url: String,
    /// When false, the caller address is not checked at all.
    pub allow_ip_check_override: bool,
}

impl CredentialSet {
    /// Creates a credential set with IP checks enabled and no allowed address. Use
    /// [`CredentialSet::with_allowed_address`] or [`CredentialSet::with_ip_check`] to complete it.
    pub fn new<S: Into<String>>(memberid: S, pin: S, password: S) -> Self {
        Self {
            memberid: memberid.into(),
            pin: Secret::from(pin.into()),
            password: Secret::from(password.into()),
            allow_ip_check_override: true,
            ..Default::default()
        }
    }

    pub fn with_allowed_address<S: Into<String>>(mut self, address: S) -> Self {
        self.allowed_address = address.into();
        self
    }

    pub fn with_report_url<S: Into<String>>(mut self, url: S) -> Self {
        self.report_url = url.into();
        self
    }

    pub fn with_ip_check(mut self, enabled: bool) -> Self {
        self.allow_ip_check_override = enabled;
        self
    }
}

//--------------------------------------       AuthSuccess          ---------------------------------------------------
/// The canonical success payload. Serializes as `{"status":"success","trxid":..,"memberid":..,"sign":..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename = "success")]
pub struct AuthSuccess {
    pub trxid: String,
    pub memberid: String,
    #[serde(rename = "sign")]
    pub signature: String,
}

impl AuthSuccess {
    pub fn new(trxid: String, memberid: String, signature: String) -> Self {
        Self { trxid, memberid, signature }
    }
}
