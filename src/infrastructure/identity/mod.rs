pub mod firebase;
pub mod in_memory;

pub use firebase::FirebaseIdentityClient;
pub use in_memory::InMemoryIdentityProvider;

use async_trait::async_trait;

/// An account as known to the identity provider
#[derive(Debug, Clone)]
pub struct ProviderIdentity {
    /// Stable opaque handle; speaker profiles are keyed by it
    pub uid: String,
    pub email: String,
    /// Short-lived provider token, needed to delete the account again
    pub id_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("email address is already registered")]
    EmailAlreadyInUse,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("identity provider rejected the request: {0}")]
    Rejected(String),
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Email/password identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderIdentity, IdentityError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderIdentity, IdentityError>;

    /// Remove an account, used to undo a sign-up whose registration failed
    async fn delete(&self, identity: &ProviderIdentity) -> Result<(), IdentityError>;
}
