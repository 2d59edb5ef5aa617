//! Drill store client

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{Drill, DrillId, UserId};
use crate::remote::RestClient;

const DRILLS_TABLE: &str = "drills";
const FAVORITES_TABLE: &str = "favorites";

/// Trait for drill storage operations (async)
#[allow(async_fn_in_trait)]
pub trait DrillStore {
    /// List every publicly visible drill
    async fn list_public_drills(&self) -> Result<Vec<Drill>>;

    /// List drills owned by the given user
    async fn list_own_drills(&self, user: UserId) -> Result<Vec<Drill>>;

    /// List drills the given user has favorited
    async fn list_favorite_drills(&self, user: UserId) -> Result<Vec<Drill>>;

    /// Create a drill
    async fn create_drill(&self, drill: &Drill) -> Result<Drill>;

    /// Update a drill's fields
    async fn update_drill(&self, drill: &Drill) -> Result<Drill>;

    /// Delete a drill by id
    async fn delete_drill(&self, id: DrillId) -> Result<()>;

    /// Mark a drill as a favorite of the given user
    async fn add_favorite(&self, user: UserId, drill: DrillId) -> Result<()>;

    /// Remove a drill from the given user's favorites
    async fn remove_favorite(&self, user: UserId, drill: DrillId) -> Result<()>;
}

/// Hosted-store implementation of `DrillStore`
#[derive(Clone)]
pub struct RestDrillStore {
    client: RestClient,
}

impl RestDrillStore {
    /// Create a store over the given REST client
    #[must_use]
    pub const fn new(client: RestClient) -> Self {
        Self { client }
    }
}

impl DrillStore for RestDrillStore {
    async fn list_public_drills(&self) -> Result<Vec<Drill>> {
        let request = self
            .client
            .get(DRILLS_TABLE)
            .query(&[("select", "*"), ("is_public", "eq.true")]);
        self.client.send_json(request).await
    }

    async fn list_own_drills(&self, user: UserId) -> Result<Vec<Drill>> {
        let request = self.client.get(DRILLS_TABLE).query(&[
            ("select", "*".to_string()),
            ("owner_id", format!("eq.{user}")),
        ]);
        self.client.send_json(request).await
    }

    async fn list_favorite_drills(&self, user: UserId) -> Result<Vec<Drill>> {
        let request = self.client.get(FAVORITES_TABLE).query(&[
            ("select", "drill:drills(*)".to_string()),
            ("user_id", format!("eq.{user}")),
        ]);
        let rows: Vec<FavoriteRow> = self.client.send_json(request).await?;
        Ok(parse_favorite_rows(rows))
    }

    async fn create_drill(&self, drill: &Drill) -> Result<Drill> {
        let request = self
            .client
            .post(DRILLS_TABLE)
            .header("Prefer", "return=representation")
            .json(drill);
        let mut rows: Vec<Drill> = self.client.send_json(request).await?;
        rows.pop()
            .ok_or_else(|| Error::Api("Create response did not return the drill".to_string()))
    }

    async fn update_drill(&self, drill: &Drill) -> Result<Drill> {
        let request = self
            .client
            .patch(DRILLS_TABLE)
            .query(&[("id", format!("eq.{}", drill.id))])
            .header("Prefer", "return=representation")
            .json(drill);
        let mut rows: Vec<Drill> = self.client.send_json(request).await?;
        rows.pop().ok_or_else(|| Error::NotFound(drill.id.to_string()))
    }

    async fn delete_drill(&self, id: DrillId) -> Result<()> {
        let request = self
            .client
            .delete(DRILLS_TABLE)
            .query(&[("id", format!("eq.{id}"))]);
        self.client.send_ok(request).await
    }

    async fn add_favorite(&self, user: UserId, drill: DrillId) -> Result<()> {
        let request = self.client.post(FAVORITES_TABLE).json(&serde_json::json!({
            "user_id": user,
            "drill_id": drill,
        }));
        self.client.send_ok(request).await
    }

    async fn remove_favorite(&self, user: UserId, drill: DrillId) -> Result<()> {
        let request = self.client.delete(FAVORITES_TABLE).query(&[
            ("user_id", format!("eq.{user}")),
            ("drill_id", format!("eq.{drill}")),
        ]);
        self.client.send_ok(request).await
    }
}

/// One favorites row with its joined drill.
#[derive(Debug, Deserialize)]
struct FavoriteRow {
    drill: Option<Drill>,
}

/// Unwrap joined favorite rows, dropping rows whose drill was deleted
/// underneath the favorite.
fn parse_favorite_rows(rows: Vec<FavoriteRow>) -> Vec<Drill> {
    rows.into_iter().filter_map(|row| row.drill).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drill_rows_decode_heterogeneous_category_fields() {
        let payload = r#"[
            {
                "id": "018f72f1-0000-7000-8000-00000000000a",
                "name": "Serve receive ladder",
                "skill_focus": "[\"Serving\",\"Passing\"]",
                "difficulty": "Intermediate",
                "type": null,
                "owner_id": "018f72f1-0000-7000-8000-000000000001",
                "is_public": true
            },
            {
                "id": "018f72f1-0000-7000-8000-00000000000b",
                "name": "Pepper",
                "owner_id": "018f72f1-0000-7000-8000-000000000001"
            }
        ]"#;

        let drills: Vec<Drill> = serde_json::from_str(payload).unwrap();
        assert_eq!(drills.len(), 2);
        assert_eq!(drills[0].skill_focus_labels(), vec!["serving", "passing"]);
        assert_eq!(drills[0].difficulty_labels(), vec!["intermediate"]);
        assert!(drills[0].is_public);
        assert!(drills[1].skill_focus.is_none());
        assert!(!drills[1].is_public);
    }

    #[test]
    fn favorite_rows_drop_dangling_joins() {
        let payload = r#"[
            {"drill": {
                "id": "018f72f1-0000-7000-8000-00000000000a",
                "name": "Pepper",
                "owner_id": "018f72f1-0000-7000-8000-000000000002"
            }},
            {"drill": null}
        ]"#;

        let rows: Vec<FavoriteRow> = serde_json::from_str(payload).unwrap();
        let drills = parse_favorite_rows(rows);
        assert_eq!(drills.len(), 1);
        assert_eq!(drills[0].name, "Pepper");
    }
}
