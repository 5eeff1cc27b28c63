use super::{IdentityError, IdentityProvider, ProviderIdentity};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Firebase Authentication (Identity Toolkit REST API) client
pub struct FirebaseIdentityClient {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl FirebaseIdentityClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    async fn post<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<R, IdentityError> {
        let url = format!("{}/accounts:{}", self.base_url, action);

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("{} request failed: {}", action, e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(action = action, status = status.as_u16(), message = %message, "Identity provider error");
            return Err(classify_error(status.as_u16(), &message));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("Failed to parse {} response: {}", action, e)))
    }

    async fn password_call(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<ProviderIdentity, IdentityError> {
        let account: AccountResponse = self
            .post(
                action,
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;

        Ok(ProviderIdentity {
            uid: account.local_id,
            email: account.email,
            id_token: account.id_token,
        })
    }
}

/// Map an Identity Toolkit error message (e.g. `WEAK_PASSWORD : ...`) to an error
fn classify_error(status: u16, message: &str) -> IdentityError {
    let code = message.split(':').next().unwrap_or_default().trim();

    match code {
        "EMAIL_EXISTS" => IdentityError::EmailAlreadyInUse,
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "USER_DISABLED" => {
            IdentityError::InvalidCredentials
        }
        _ if status >= 500 || status == 429 => IdentityError::Unavailable(message.to_string()),
        _ => IdentityError::Rejected(message.to_string()),
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderIdentity, IdentityError> {
        self.password_call("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderIdentity, IdentityError> {
        self.password_call("signInWithPassword", email, password).await
    }

    async fn delete(&self, identity: &ProviderIdentity) -> Result<(), IdentityError> {
        let _: serde_json::Value = self
            .post(
                "delete",
                &DeleteRequest {
                    id_token: &identity.id_token,
                },
            )
            .await?;

        tracing::info!(uid = %identity.uid, "Identity deleted");
        Ok(())
    }
}
