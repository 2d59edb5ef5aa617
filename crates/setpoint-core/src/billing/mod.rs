//! Entitlement client for the subscription-billing provider.
//!
//! The rest of the app treats billing as a boolean gate: premium paths
//! (drill image upload, full library browsing) check `is_active` and nothing
//! else. Status is re-fetched on demand; there is no caching contract.

use reqwest::Client;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::UserId;
use crate::remote::parse_api_error;
use crate::util::is_http_url;

/// The billing provider's answer for one user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntitlementStatus {
    /// Whether a premium entitlement is currently active
    pub is_active: bool,
    /// Provider-defined tier name, when one applies
    #[serde(default)]
    pub tier: Option<String>,
}

impl EntitlementStatus {
    /// The status used when no provider is configured: everything gated off.
    #[must_use]
    pub const fn inactive() -> Self {
        Self {
            is_active: false,
            tier: None,
        }
    }
}

/// Trait for entitlement lookups (async)
#[allow(async_fn_in_trait)]
pub trait EntitlementProvider {
    /// Fetch the current entitlement status for a user
    async fn entitlement_status(&self, user: UserId) -> Result<EntitlementStatus>;
}

/// HTTP implementation querying the billing provider's subscriber endpoint.
#[derive(Clone)]
pub struct RestEntitlementProvider {
    base_url: String,
    api_key: String,
    client: Client,
}

impl RestEntitlementProvider {
    pub fn new(base_url: impl AsRef<str>, api_key: impl Into<String>) -> Result<Self> {
        let base_url = base_url.as_ref().trim().trim_end_matches('/').to_string();
        if !is_http_url(&base_url) {
            return Err(Error::InvalidInput(
                "Billing URL must include http:// or https://".to_string(),
            ));
        }

        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(Error::InvalidInput(
                "Billing API key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            api_key,
            client: Client::builder().build()?,
        })
    }
}

impl EntitlementProvider for RestEntitlementProvider {
    async fn entitlement_status(&self, user: UserId) -> Result<EntitlementStatus> {
        let response = self
            .client
            .get(format!("{}/v1/entitlements/{user}", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(parse_api_error(status, &body)));
        }

        Ok(response.json::<EntitlementStatus>().await?)
    }
}
