use reqwest::StatusCode;
use serde::Deserialize;

/// Identity resolved by the external identity provider for a bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifiedIdentity {
    /// Stable provider-issued subject ID.
    pub id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Client for the identity provider's token-verification endpoint.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Verify a bearer token with the provider.
    ///
    /// Returns `Ok(None)` when the provider rejects the credential; transport
    /// and unexpected provider failures surface as errors.
    pub async fn verify_bearer(
        &self,
        token: &str,
    ) -> Result<Option<VerifiedIdentity>, reqwest::Error> {
        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .bearer_auth(token)
            .header("apikey", &self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED
            || response.status() == StatusCode::FORBIDDEN
        {
            return Ok(None);
        }

        let identity = response.error_for_status()?.json().await?;

        Ok(Some(identity))
    }
}
