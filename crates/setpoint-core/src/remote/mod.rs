//! Remote store clients
//!
//! Thin REST clients for the hosted drill and practice tables. The core's
//! job begins once an array of records is in hand; everything here is
//! request/response plumbing shared by the per-table stores.

mod drills;
mod practices;

pub use drills::{DrillStore, RestDrillStore};
pub use practices::{PracticeStore, RestPracticeStore};

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::util::{compact_text, is_http_url};

/// Connection settings for the hosted store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    base_url: String,
    anon_key: String,
}

impl StoreConfig {
    /// Validate and normalize the base URL and public API key.
    pub fn new(base_url: impl AsRef<str>, anon_key: impl Into<String>) -> Result<Self> {
        let base_url = base_url.as_ref().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::InvalidInput(
                "Store URL must not be empty".to_string(),
            ));
        }
        if !is_http_url(&base_url) {
            return Err(Error::InvalidInput(
                "Store URL must include http:// or https://".to_string(),
            ));
        }

        let anon_key = anon_key.into().trim().to_string();
        if anon_key.is_empty() {
            return Err(Error::InvalidInput(
                "Store anon key must not be empty".to_string(),
            ));
        }

        Ok(Self { base_url, anon_key })
    }

    /// Build a table endpoint URL
    #[must_use]
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    /// The base URL and anon key, for clients that share the provider
    /// endpoint (auth lives under the same host).
    #[must_use]
    pub fn credentials(&self) -> (String, String) {
        (self.base_url.clone(), self.anon_key.clone())
    }
}

/// Shared HTTP client carrying the store headers.
#[derive(Clone)]
pub struct RestClient {
    config: StoreConfig,
    access_token: Option<String>,
    client: Client,
}

impl RestClient {
    /// Create a client. `access_token` is the signed-in user's bearer token;
    /// without one, requests carry the anon key and reach only public rows.
    pub fn new(config: StoreConfig, access_token: Option<String>) -> Result<Self> {
        Ok(Self {
            config,
            access_token,
            client: Client::builder().build()?,
        })
    }

    pub(crate) fn get(&self, table: &str) -> RequestBuilder {
        self.authed(self.client.get(self.config.table_url(table)))
    }

    pub(crate) fn post(&self, table: &str) -> RequestBuilder {
        self.authed(self.client.post(self.config.table_url(table)))
    }

    pub(crate) fn patch(&self, table: &str) -> RequestBuilder {
        self.authed(self.client.patch(self.config.table_url(table)))
    }

    pub(crate) fn delete(&self, table: &str) -> RequestBuilder {
        self.authed(self.client.delete(self.config.table_url(table)))
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .access_token
            .as_deref()
            .unwrap_or(&self.config.anon_key);
        request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    /// Send a request and decode a JSON body, mapping non-2xx responses to
    /// readable API errors.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(parse_api_error(status, &body)));
        }
        Ok(response.json::<T>().await?)
    }

    /// Send a request whose response body is irrelevant.
    pub(crate) async fn send_ok(&self, request: RequestBuilder) -> Result<()> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(parse_api_error(status, &body)));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct StoreErrorResponse {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
    error: Option<String>,
}

/// Extract a readable message from a store error body.
pub fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<StoreErrorResponse>(body) {
        if let Some(message) = payload
            .message
            .or(payload.error)
            .or(payload.details)
            .or(payload.hint)
        {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", compact_text(trimmed), status.as_u16())
    }
}
