use cucumber::World;
use oto_auth_engine::{
    AuthSuccess,
    CredentialSet,
    StaticCredentialProvider,
    TransactionAuthApi,
    TransactionAuthError,
    TransactionAuthRequest,
};

#[derive(Default, Debug, World)]
pub struct AuthWorld {
    pub credentials: CredentialSet,
    pub request: TransactionAuthRequest,
    pub caller_address: String,
    pub outcome: Option<Result<AuthSuccess, TransactionAuthError>>,
}

impl AuthWorld {
    pub fn authenticate(&mut self) {
        let api = TransactionAuthApi::new(StaticCredentialProvider::new(self.credentials.clone()));
        self.outcome = Some(api.authenticate_transaction(&self.request, &self.caller_address));
    }

    pub fn outcome(&self) -> &Result<AuthSuccess, TransactionAuthError> {
        self.outcome.as_ref().expect("The request has not been authenticated yet")
    }
}
