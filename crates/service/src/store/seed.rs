//! First-run data: one admin account and three default categories.

use tracing::info;
use uuid::Uuid;

use models::{Category, Comment, Post, User};

use super::{now, RecordStore};
use crate::auth::password::hash_password;
use crate::errors::StoreError;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_NAME: &str = "Admin User";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Seed records use fixed ids so links to them survive a reset.
pub const ADMIN_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0001);

const DEFAULT_CATEGORIES: [(u128, &str, &str, &str); 3] = [
    (0x0000_0000_0000_4000_8000_0000_0000_0101, "Technology", "technology", "Latest tech news and reviews"),
    (0x0000_0000_0000_4000_8000_0000_0000_0102, "Lifestyle", "lifestyle", "Tips for better living"),
    (0x0000_0000_0000_4000_8000_0000_0000_0103, "Education", "education", "Learning resources and guides"),
];

pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(id, name, slug, description)| Category {
            id: Uuid::from_u128(*id),
            name: (*name).to_string(),
            slug: (*slug).to_string(),
            description: Some((*description).to_string()),
        })
        .collect()
}

/// Which keys `initialize` had to write.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users: bool,
    pub categories: bool,
    pub posts: bool,
    pub comments: bool,
}

impl SeedReport {
    pub fn any(&self) -> bool { self.users || self.categories || self.posts || self.comments }
}

impl RecordStore {
    /// Write seed data into every collection key that was never written.
    /// Keys that already hold data, even an empty array, are left alone.
    pub async fn initialize(&self) -> Result<SeedReport, StoreError> {
        let _guard = self.lock().await;
        let mut report = SeedReport::default();

        if !self.users.is_initialized().await? {
            let admin = User {
                id: ADMIN_ID,
                name: ADMIN_NAME.to_string(),
                email: ADMIN_EMAIL.to_string(),
                password: hash_password(ADMIN_PASSWORD)?,
                is_admin: true,
                avatar: None,
                created_at: now(),
            };
            self.users.save(&[admin]).await?;
            report.users = true;
        }
        if !self.categories.is_initialized().await? {
            self.categories.save(&default_categories()).await?;
            report.categories = true;
        }
        if !self.posts.is_initialized().await? {
            self.posts.save(&Vec::<Post>::new()).await?;
            report.posts = true;
        }
        if !self.comments.is_initialized().await? {
            self.comments.save(&Vec::<Comment>::new()).await?;
            report.comments = true;
        }

        if report.any() {
            info!(?report, "record store seeded");
        }
        Ok(report)
    }
}
