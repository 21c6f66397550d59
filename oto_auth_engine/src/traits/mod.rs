//! Seams between the engine and the outside world.
mod credential_provider;

pub use credential_provider::{CredentialProvider, CredentialProviderError, StaticCredentialProvider};
