use thiserror::Error;

use crate::CredentialProviderError;

/// Why a transaction request was refused. These are expected outcomes, not defects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("Provide either 'pin' and 'password', or 'sign'.")]
    MissingProof,
    #[error("Invalid IP. The caller address is not allowed for this member.")]
    ForbiddenAddress,
    #[error("Invalid pin or password.")]
    BadCredentials,
    #[error("Signature does not match the supplied pin and password.")]
    SignatureMismatch,
    #[error("Invalid signature.")]
    BadSignature,
}

impl AuthFailure {
    /// The HTTP status code the boundary layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingProof => 400,
            Self::ForbiddenAddress => 403,
            Self::BadCredentials => 401,
            Self::SignatureMismatch => 401,
            Self::BadSignature => 401,
        }
    }

    /// The machine-readable reason code.
    pub fn rc(&self) -> &'static str {
        match self {
            Self::MissingProof => "MissingProof",
            Self::ForbiddenAddress => "ForbiddenAddress",
            Self::BadCredentials => "BadCredentials",
            Self::SignatureMismatch => "SignatureMismatch",
            Self::BadSignature => "BadSignature",
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum TransactionAuthError {
    #[error(transparent)]
    Rejected(#[from] AuthFailure),
    #[error("Internal error. {0}")]
    Internal(String),
}

impl From<CredentialProviderError> for TransactionAuthError {
    fn from(e: CredentialProviderError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl TransactionAuthError {
    /// The authentication failure, if this was one.
    pub fn failure(&self) -> Option<AuthFailure> {
        match self {
            Self::Rejected(f) => Some(*f),
            Self::Internal(_) => None,
        }
    }
}
