use super::{IdentityError, IdentityProvider, ProviderIdentity};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Identity provider keeping accounts in memory, for local development and tests
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    accounts: Mutex<HashMap<String, (String, String)>>,
    deleted: Mutex<Vec<String>>,
    next_uid: Mutex<u64>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().len()
    }

    pub fn deleted_uids(&self) -> Vec<String> {
        self.deleted.lock().clone()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderIdentity, IdentityError> {
        let mut accounts = self.accounts.lock();
        if accounts.contains_key(email) {
            return Err(IdentityError::EmailAlreadyInUse);
        }

        let uid = {
            let mut next = self.next_uid.lock();
            *next += 1;
            format!("uid-{}", next)
        };
        accounts.insert(email.to_string(), (uid.clone(), password.to_string()));

        Ok(ProviderIdentity {
            uid: uid.clone(),
            email: email.to_string(),
            id_token: format!("token-{}", uid),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderIdentity, IdentityError> {
        match self.accounts.lock().get(email) {
            Some((uid, stored)) if stored == password => Ok(ProviderIdentity {
                uid: uid.clone(),
                email: email.to_string(),
                id_token: format!("token-{}", uid),
            }),
            _ => Err(IdentityError::InvalidCredentials),
        }
    }

    async fn delete(&self, identity: &ProviderIdentity) -> Result<(), IdentityError> {
        self.accounts.lock().retain(|_, (uid, _)| uid != &identity.uid);
        self.deleted.lock().push(identity.uid.clone());
        Ok(())
    }
}
