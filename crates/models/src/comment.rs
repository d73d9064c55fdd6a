use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{self, ModelError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub is_approved: bool,
}

/// Comment submission. There is no approval flag: every new comment waits
/// for moderation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
}

impl NewComment {
    pub fn into_record(self, id: Uuid, now: DateTime<Utc>) -> Result<Comment, ModelError> {
        errors::require("content", &self.content)?;
        Ok(Comment {
            id,
            post_id: self.post_id,
            user_id: self.user_id,
            content: self.content.trim().to_string(),
            created_at: now,
            is_approved: false,
        })
    }
}
