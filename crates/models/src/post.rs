use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{self, ModelError};
use crate::slug;

/// Read time shown when an author leaves it blank.
pub const DEFAULT_READ_TIME: u32 = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub category_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Post creation input. The author normally comes from the session, the
/// rest from the editor form.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    /// Derived from `title` when absent or blank.
    #[serde(default)]
    pub slug: Option<String>,
    pub content: String,
    pub excerpt: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    pub category_id: Uuid,
    pub author_id: Uuid,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub read_time: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Trim every tag and drop the empty ones.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// `None` and zero both mean "use the default".
pub fn normalize_read_time(read_time: Option<u32>) -> Option<u32> {
    match read_time {
        Some(0) | None => Some(DEFAULT_READ_TIME),
        Some(n) => Some(n),
    }
}

/// Publication timestamp for a post moving into `is_published`: keep the
/// previous one if it was already published, stamp `now` on first publish,
/// clear it on unpublish.
pub fn published_at_for(is_published: bool, previous: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if !is_published {
        return None;
    }
    Some(previous.unwrap_or(now))
}

fn trimmed_opt(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl NewPost {
    pub fn into_record(self, id: Uuid, now: DateTime<Utc>) -> Result<Post, ModelError> {
        let mut post = Post {
            id,
            slug: slug::slug_or_derive(self.slug.as_deref(), &self.title),
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            cover_image: self.cover_image,
            category_id: self.category_id,
            author_id: self.author_id,
            created_at: now,
            updated_at: now,
            published_at: published_at_for(self.is_published, None, now),
            is_published: self.is_published,
            read_time: self.read_time,
            tags: self.tags,
        };
        post.normalize();
        post.validate()?;
        Ok(post)
    }
}

impl Post {
    /// Trim text fields and apply read-time/tag defaults.
    pub fn normalize(&mut self) {
        self.title = self.title.trim().to_string();
        self.slug = self.slug.trim().to_string();
        self.content = self.content.trim().to_string();
        self.excerpt = self.excerpt.trim().to_string();
        self.cover_image = trimmed_opt(self.cover_image.take());
        self.read_time = normalize_read_time(self.read_time);
        self.tags = normalize_tags(std::mem::take(&mut self.tags));
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        errors::require("title", &self.title)?;
        slug::validate_slug(&self.slug)?;
        errors::require("content", &self.content)?;
        errors::require("excerpt", &self.excerpt)?;
        if self.category_id.is_nil() {
            return Err(ModelError::required("categoryId"));
        }
        Ok(())
    }

    /// Case-insensitive match against title or content.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower) || self.content.to_lowercase().contains(query_lower)
    }
}
