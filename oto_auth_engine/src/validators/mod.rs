//! The individual checks that make up the authentication pipeline. Each validator is stateless and reads the
//! [`crate::CredentialSet`] it is given; none of them know about the others.
mod client_location;
mod credentials;
mod signature;

pub use client_location::ClientLocationValidator;
pub use credentials::CredentialValidator;
pub use signature::SignatureValidator;
