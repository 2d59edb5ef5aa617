//! Practice store client

use crate::error::{Error, Result};
use crate::models::{Practice, PracticeId, UserId};
use crate::remote::RestClient;

const PRACTICES_TABLE: &str = "practices";

/// Trait for practice storage operations (async)
#[allow(async_fn_in_trait)]
pub trait PracticeStore {
    /// List practices owned by the given user, by start time
    async fn list_practices(&self, user: UserId) -> Result<Vec<Practice>>;

    /// Create a practice. Validation runs client-side first; an invalid
    /// practice never reaches the network.
    async fn create_practice(&self, practice: &Practice) -> Result<Practice>;

    /// Update a practice, with the same validation gate as `create_practice`
    async fn update_practice(&self, practice: &Practice) -> Result<Practice>;

    /// Delete a practice by id
    async fn delete_practice(&self, id: PracticeId) -> Result<()>;
}

/// Hosted-store implementation of `PracticeStore`
#[derive(Clone)]
pub struct RestPracticeStore {
    client: RestClient,
}

impl RestPracticeStore {
    /// Create a store over the given REST client
    #[must_use]
    pub const fn new(client: RestClient) -> Self {
        Self { client }
    }
}

impl PracticeStore for RestPracticeStore {
    async fn list_practices(&self, user: UserId) -> Result<Vec<Practice>> {
        let request = self.client.get(PRACTICES_TABLE).query(&[
            ("select", "*".to_string()),
            ("owner_id", format!("eq.{user}")),
            ("order", "start_time.asc".to_string()),
        ]);
        self.client.send_json(request).await
    }

    async fn create_practice(&self, practice: &Practice) -> Result<Practice> {
        practice.validate()?;

        let request = self
            .client
            .post(PRACTICES_TABLE)
            .header("Prefer", "return=representation")
            .json(practice);
        let mut rows: Vec<Practice> = self.client.send_json(request).await?;
        rows.pop()
            .ok_or_else(|| Error::Api("Create response did not return the practice".to_string()))
    }

    async fn update_practice(&self, practice: &Practice) -> Result<Practice> {
        practice.validate()?;

        let request = self
            .client
            .patch(PRACTICES_TABLE)
            .query(&[("id", format!("eq.{}", practice.id))])
            .header("Prefer", "return=representation")
            .json(practice);
        let mut rows: Vec<Practice> = self.client.send_json(request).await?;
        rows.pop()
            .ok_or_else(|| Error::NotFound(practice.id.to_string()))
    }

    async fn delete_practice(&self, id: PracticeId) -> Result<()> {
        let request = self
            .client
            .delete(PRACTICES_TABLE)
            .query(&[("id", format!("eq.{id}"))]);
        self.client.send_ok(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{RestClient, StoreConfig};

    fn owner() -> UserId {
        "018f72f1-0000-7000-8000-000000000001".parse().unwrap()
    }

    #[test]
    fn practice_rows_decode() {
        let payload = r#"[
            {
                "id": "018f72f1-0000-7000-8000-00000000000c",
                "owner_id": "018f72f1-0000-7000-8000-000000000001",
                "start_time": 1700000000000,
                "end_time": 1700005400000,
                "drills": ["Warmup", "Pepper"],
                "drill_durations": [30, 60],
                "notes": "Focus on serve receive"
            }
        ]"#;

        let practices: Vec<Practice> = serde_json::from_str(payload).unwrap();
        assert_eq!(practices.len(), 1);
        assert_eq!(practices[0].total_minutes(), 90);
        practices[0].validate().unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn create_rejects_invalid_practice_before_any_request() {
        // Unroutable config: if validation did not gate the call, the store
        // would return a connection error instead of InvalidInput.
        let config = StoreConfig::new("http://invalid.localdomain", "anon").unwrap();
        let store = RestPracticeStore::new(RestClient::new(config, None).unwrap());

        let practice = Practice::new(owner(), 1_000, 2_000);
        let err = store.create_practice(&practice).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
