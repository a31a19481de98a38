use serde::{Deserialize, Serialize};

use crate::models::Priority;

/// A single-field edit applied through the generic task setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum TaskField {
    Content(String),
    Priority(Priority),
    Tags(Vec<String>),
    Dependencies(Vec<String>),
    Archived(bool),
}
