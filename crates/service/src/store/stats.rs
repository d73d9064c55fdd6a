use std::cmp::Reverse;

use serde::Serialize;

use models::Post;

use super::RecordStore;
use crate::errors::StoreError;

/// How many posts the dashboard lists as recent.
pub const RECENT_POSTS: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_posts: usize,
    pub published_posts: usize,
    pub draft_posts: usize,
    pub total_comments: usize,
    pub pending_comments: usize,
    pub total_users: usize,
    pub recent_posts: Vec<Post>,
}

impl RecordStore {
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, StoreError> {
        let mut posts = self.posts.load().await?;
        let comments = self.comments.load().await?;
        let total_users = self.users.load().await?.len();

        let published_posts = posts.iter().filter(|p| p.is_published).count();
        let pending_comments = comments.iter().filter(|c| !c.is_approved).count();
        let total_posts = posts.len();

        posts.sort_by_key(|p| Reverse(p.created_at));
        posts.truncate(RECENT_POSTS);

        Ok(DashboardStats {
            total_posts,
            published_posts,
            draft_posts: total_posts - published_posts,
            total_comments: comments.len(),
            pending_comments,
            total_users,
            recent_posts: posts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RECENT_POSTS;
    use crate::store::test_support::*;

    #[tokio::test]
    async fn counts_and_recent_posts() -> anyhow::Result<()> {
        let (store, admin) = seeded().await;
        let tech = technology(&store).await;

        let empty = store.dashboard_stats().await?;
        assert_eq!((empty.total_posts, empty.total_users), (0, 1));
        assert!(empty.recent_posts.is_empty());

        let mut last = None;
        for i in 0..7 {
            let mut p = new_post(&format!("Post {i}"), &format!("post-{i}"), tech.id, admin.id);
            p.is_published = i % 2 == 0;
            last = Some(store.save_post(p).await?);
        }
        let last = last.expect("saved");
        let c = store.save_comment(new_comment(last.id, admin.id, "nice")).await?;
        store.save_comment(new_comment(last.id, admin.id, "again")).await?;
        store.approve_comment(c.id).await?;

        let stats = store.dashboard_stats().await?;
        assert_eq!(stats.total_posts, 7);
        assert_eq!(stats.published_posts, 4);
        assert_eq!(stats.draft_posts, 3);
        assert_eq!(stats.total_comments, 2);
        assert_eq!(stats.pending_comments, 1);
        assert_eq!(stats.total_users, 1);
        assert_eq!(stats.recent_posts.len(), RECENT_POSTS);
        assert_eq!(stats.recent_posts[0].id, last.id);
        Ok(())
    }
}
