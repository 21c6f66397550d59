//! OtomaX Authentication Engine
//!
//! This library decides whether an inbound OtomaX-style transaction request is authentic. It is transport-agnostic:
//! callers hand it an already-parsed [`TransactionAuthRequest`] and the caller's network address, and get back either
//! an [`AuthSuccess`] record or a typed failure.
//!
//! The library is divided into three sections:
//! 1. The transaction signature algorithm ([`mod@helpers`]). This is a wire-compatibility contract with the legacy
//!    protocol and must stay bit-exact.
//! 2. The validators ([`mod@validators`]). Each one checks a single concern (caller location, pin/password, signature)
//!    against the configured [`CredentialSet`].
//! 3. The public API ([`TransactionAuthApi`]), which runs the validators in order and short-circuits on the first
//!    failure.
//!
//! Configuration is supplied through the [`CredentialProvider`] trait. [`StaticCredentialProvider`] serves a single
//! configured identity, which is all the gateway needs today.
pub mod auth_types;
pub mod helpers;
pub mod traits;
pub mod validators;

mod auth_api;

pub use auth_api::{
    errors::{AuthFailure, TransactionAuthError},
    transaction_auth_api::TransactionAuthApi,
};
pub use auth_types::{AuthSuccess, CredentialSet, ProofMode, TransactionAuthRequest};
pub use traits::{CredentialProvider, CredentialProviderError, StaticCredentialProvider};
