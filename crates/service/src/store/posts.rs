use std::cmp::Reverse;

use tracing::info;
use uuid::Uuid;

use models::post::published_at_for;
use models::{NewPost, Post};

use super::filters::{normalized_query, PostFilter};
use super::{now, RecordStore};
use crate::errors::StoreError;

fn newest_first(posts: &mut [Post]) {
    posts.sort_by_key(|p| Reverse(p.created_at));
}

impl RecordStore {
    pub async fn posts(&self) -> Result<Vec<Post>, StoreError> {
        self.posts.load().await
    }

    pub async fn post_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.load().await?.into_iter().find(|p| p.id == id))
    }

    pub async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.load().await?.into_iter().find(|p| p.slug == slug))
    }

    /// Published posts of one category, in stored order.
    pub async fn posts_by_category(&self, category_id: Uuid) -> Result<Vec<Post>, StoreError> {
        let mut posts = self.posts.load().await?;
        posts.retain(|p| p.category_id == category_id && p.is_published);
        Ok(posts)
    }

    /// Published posts, newest first.
    pub async fn published_posts(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts = self.posts.load().await?;
        posts.retain(|p| p.is_published);
        newest_first(&mut posts);
        Ok(posts)
    }

    /// All posts matching `filter`, newest first.
    pub async fn search_posts(&self, filter: &PostFilter) -> Result<Vec<Post>, StoreError> {
        let query = normalized_query(filter.query.as_deref());
        let mut posts = self.posts.load().await?;
        posts.retain(|p| {
            filter.status.admits(p.is_published) && query.as_deref().map_or(true, |q| p.matches(q))
        });
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn check_post_refs(&self, post: &Post) -> Result<(), StoreError> {
        if self.category_by_id(post.category_id).await?.is_none() {
            return Err(StoreError::validation(format!("unknown category: {}", post.category_id)));
        }
        if self.user_by_id(post.author_id).await?.is_none() {
            return Err(StoreError::validation(format!("unknown author: {}", post.author_id)));
        }
        Ok(())
    }

    pub async fn save_post(&self, input: NewPost) -> Result<Post, StoreError> {
        let post = input.into_record(Uuid::new_v4(), now())?;
        let _guard = self.lock().await;
        self.check_post_refs(&post).await?;
        self.posts
            .update(|posts| {
                if posts.iter().any(|p| p.slug == post.slug) {
                    return Err(StoreError::conflict(format!("post slug already used: {}", post.slug)));
                }
                posts.push(post.clone());
                Ok(())
            })
            .await?;
        info!(post_id = %post.id, slug = %post.slug, published = post.is_published, "post_saved");
        Ok(post)
    }

    /// Replace the post with the same id and refresh `updatedAt`. `createdAt`
    /// is kept from the stored record and `publishedAt` follows the
    /// publication flag. `None` if the id is unknown.
    pub async fn update_post(&self, mut post: Post) -> Result<Option<Post>, StoreError> {
        post.normalize();
        post.validate()?;

        let _guard = self.lock().await;
        let Some(existing) = self.post_by_id(post.id).await? else {
            return Ok(None);
        };
        self.check_post_refs(&post).await?;

        let stamp = now();
        post.created_at = existing.created_at;
        post.updated_at = stamp.max(existing.updated_at);
        post.published_at = published_at_for(post.is_published, existing.published_at, stamp);

        let updated = self
            .posts
            .update(|posts| {
                if posts.iter().any(|p| p.id != post.id && p.slug == post.slug) {
                    return Err(StoreError::conflict(format!("post slug already used: {}", post.slug)));
                }
                match posts.iter_mut().find(|p| p.id == post.id) {
                    Some(slot) => {
                        *slot = post.clone();
                        Ok(Some(post.clone()))
                    }
                    None => Ok(None),
                }
            })
            .await?;
        if updated.is_some() {
            info!(post_id = %post.id, published = post.is_published, "post_updated");
        }
        Ok(updated)
    }

    /// Delete a post and every comment attached to it. Returns whether the
    /// post existed.
    pub async fn delete_post(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.lock().await;
        // comments first: an interrupted delete leaves a post without
        // comments rather than comments without a post
        let removed_comments = self
            .comments
            .update(|comments| {
                let before = comments.len();
                comments.retain(|c| c.post_id != id);
                Ok(before - comments.len())
            })
            .await?;
        let existed = self
            .posts
            .update(|posts| {
                let before = posts.len();
                posts.retain(|p| p.id != id);
                Ok(posts.len() != before)
            })
            .await?;
        if existed {
            info!(post_id = %id, removed_comments, "post_deleted");
        }
        Ok(existed)
    }
}
