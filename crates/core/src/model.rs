use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned task identifier.
pub type TaskId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "text", alias = "description")]
    pub description: String,
    #[serde(rename = "completed", alias = "done", default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn status_marker(&self) -> &'static str {
        if self.done {
            "x"
        } else {
            " "
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.status_marker(),
            self.id,
            self.description
        )
    }
}

/// Outcome of deleting a single id from a batch.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeleteResult {
    pub id: TaskId,
    pub deleted: bool,
}
