use std::cmp::Reverse;
use std::collections::HashMap;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use models::{Comment, NewComment};

use super::filters::{normalized_query, CommentFilter};
use super::{now, RecordStore};
use crate::errors::StoreError;

/// A comment as the moderation screen shows it: with its author's name and
/// the title of the post it belongs to (either may be gone).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeratedComment {
    #[serde(flatten)]
    pub comment: Comment,
    pub author_name: Option<String>,
    pub post_title: Option<String>,
}

impl ModeratedComment {
    fn matches(&self, query_lower: &str) -> bool {
        let hit = |s: &str| s.to_lowercase().contains(query_lower);
        hit(&self.comment.content)
            || self.author_name.as_deref().is_some_and(hit)
            || self.post_title.as_deref().is_some_and(hit)
    }
}

impl RecordStore {
    pub async fn comments(&self) -> Result<Vec<Comment>, StoreError> {
        self.comments.load().await
    }

    pub async fn comment_by_id(&self, id: Uuid) -> Result<Option<Comment>, StoreError> {
        Ok(self.comments.load().await?.into_iter().find(|c| c.id == id))
    }

    /// Approved comments of one post, in submission order.
    pub async fn comments_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, StoreError> {
        let mut comments = self.comments.load().await?;
        comments.retain(|c| c.post_id == post_id && c.is_approved);
        Ok(comments)
    }

    pub async fn pending_comments(&self) -> Result<Vec<Comment>, StoreError> {
        let mut comments = self.comments.load().await?;
        comments.retain(|c| !c.is_approved);
        Ok(comments)
    }

    /// Submit a comment. It always starts unapproved.
    pub async fn save_comment(&self, input: NewComment) -> Result<Comment, StoreError> {
        let comment = input.into_record(Uuid::new_v4(), now())?;
        let _guard = self.lock().await;
        if self.post_by_id(comment.post_id).await?.is_none() {
            return Err(StoreError::validation(format!("unknown post: {}", comment.post_id)));
        }
        if self.user_by_id(comment.user_id).await?.is_none() {
            return Err(StoreError::validation(format!("unknown user: {}", comment.user_id)));
        }
        self.comments
            .update(|comments| {
                comments.push(comment.clone());
                Ok(())
            })
            .await?;
        info!(comment_id = %comment.id, post_id = %comment.post_id, "comment_submitted");
        Ok(comment)
    }

    /// Mark a comment approved. Idempotent; returns whether it exists.
    pub async fn approve_comment(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.lock().await;
        let found = self
            .comments
            .update(|comments| match comments.iter_mut().find(|c| c.id == id) {
                Some(c) => {
                    c.is_approved = true;
                    Ok(true)
                }
                None => Ok(false),
            })
            .await?;
        if found {
            info!(comment_id = %id, "comment_approved");
        }
        Ok(found)
    }

    /// Returns whether the comment existed.
    pub async fn delete_comment(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.lock().await;
        let existed = self
            .comments
            .update(|comments| {
                let before = comments.len();
                comments.retain(|c| c.id != id);
                Ok(comments.len() != before)
            })
            .await?;
        if existed {
            info!(comment_id = %id, "comment_deleted");
        }
        Ok(existed)
    }

    /// Comments for moderation matching `filter`, newest first.
    pub async fn search_comments(&self, filter: &CommentFilter) -> Result<Vec<ModeratedComment>, StoreError> {
        let query = normalized_query(filter.query.as_deref());
        let authors: HashMap<Uuid, String> = self.users.load().await?.into_iter().map(|u| (u.id, u.name)).collect();
        let titles: HashMap<Uuid, String> = self.posts.load().await?.into_iter().map(|p| (p.id, p.title)).collect();

        let mut out: Vec<ModeratedComment> = self
            .comments
            .load()
            .await?
            .into_iter()
            .filter(|c| filter.status.admits(c.is_approved))
            .map(|c| ModeratedComment {
                author_name: authors.get(&c.user_id).cloned(),
                post_title: titles.get(&c.post_id).cloned(),
                comment: c,
            })
            .filter(|m| query.as_deref().map_or(true, |q| m.matches(q)))
            .collect();
        out.sort_by_key(|m| Reverse(m.comment.created_at));
        Ok(out)
    }
}
