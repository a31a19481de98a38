use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form note that can later be promoted into a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub content: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}
