use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An adventure row joined with its owner's email.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Adventure {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub owner_id: i64,
    pub owner_email: String,
}

impl Adventure {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

/// Wire representation shared by create, list, get and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventureResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub owner: String,
}

impl From<Adventure> for AdventureResponse {
    fn from(a: Adventure) -> Self {
        AdventureResponse {
            id: a.id,
            title: a.title,
            description: a.description,
            owner: a.owner_email,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateAdventureRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateAdventureRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl UpdateAdventureRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}
