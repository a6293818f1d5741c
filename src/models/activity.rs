//! Activity log events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of mutation an activity event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
    Deploy,
    Return,
}

impl Mutation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mutation::Create => "create",
            Mutation::Update => "update",
            Mutation::Delete => "delete",
            Mutation::Deploy => "deploy",
            Mutation::Return => "return",
        }
    }

    /// Activity type tag, e.g. `vehicle-update`.
    pub fn kind(&self, entity: &str) -> String {
        format!("{}-{}", entity, self.as_str())
    }
}

/// A stored activity event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub user: String,
    pub user_initials: String,
    pub item: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// An activity event about to be appended.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub kind: String,
    pub user: String,
    pub user_initials: String,
    pub item: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}
