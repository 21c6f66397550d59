use std::sync::Arc;

use thiserror::Error;

use crate::CredentialSet;

#[derive(Debug, Clone, Error)]
pub enum CredentialProviderError {
    #[error("Member credentials are not configured. {0}")]
    NotConfigured(String),
}

/// Read-only access to the credential set the gateway authenticates against.
///
/// Implementations are expected to load their configuration once and hand out cheap shared references from then on.
/// An error here is a deployment problem, not an authentication failure, and is reported as such.
pub trait CredentialProvider {
    fn credentials(&self) -> Result<Arc<CredentialSet>, CredentialProviderError>;
}

/// Serves a single, fixed credential set.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credentials: Arc<CredentialSet>,
}

impl StaticCredentialProvider {
    pub fn new(credentials: CredentialSet) -> Self {
        Self { credentials: Arc::new(credentials) }
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn credentials(&self) -> Result<Arc<CredentialSet>, CredentialProviderError> {
        Ok(Arc::clone(&self.credentials))
    }
}
