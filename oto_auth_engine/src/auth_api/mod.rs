//! # Transaction authentication API
//!
//! [`transaction_auth_api::TransactionAuthApi`] is the only entry point external callers need. It is created by
//! supplying a [`crate::CredentialProvider`]; the validators are constructed alongside it (or injected with
//! `with_validators`).
//!
//! ```rust,ignore
//! use oto_auth_engine::{CredentialSet, StaticCredentialProvider, TransactionAuthApi, TransactionAuthRequest};
//! let credentials = CredentialSet::new("TESTOK01", "1111", "TESTOK01").with_allowed_address("10.0.0.2");
//! let api = TransactionAuthApi::new(StaticCredentialProvider::new(credentials));
//! let request = TransactionAuthRequest::new("trx-1", "TESTOK01", "08123456789", "PROD").with_pin_password("1111", "TESTOK01");
//! let success = api.authenticate_transaction(&request, "10.0.0.2")?;
//! ```
pub mod errors;
pub mod transaction_auth_api;
