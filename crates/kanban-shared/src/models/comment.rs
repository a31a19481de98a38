use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("comment-{}", Uuid::new_v4().simple()),
            content: content.into(),
            created_at: now,
        }
    }
}
