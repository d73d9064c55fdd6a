//! The blog record store.
//!
//! [`RecordStore`] owns a storage backend and exposes typed operations over
//! four collections (users, posts, categories, comments) plus the current
//! session record. It is constructed once per process and shared by
//! reference (`Arc<RecordStore>`).
//!
//! Semantics every operation follows:
//! - a lookup that finds nothing returns `None` or an empty `Vec`;
//! - updating, approving or deleting an absent id is a no-op, never an error;
//! - created records get a v4 UUID and server-side timestamps;
//! - errors are reserved for invalid input, uniqueness/in-use conflicts and
//!   storage failures (I/O, corrupt JSON).
//!
//! Mutations take a store-wide write lock for their whole
//! read-modify-write sequence, so concurrent writers sharing one store do not
//! lose updates. Separate processes over the same data directory still can.

use std::{path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard};

use models::{Category, Comment, Post, User, UserProfile};

use crate::errors::StoreError;
use crate::storage::{FileBackend, JsonCollection, JsonDocument, KvBackend, MemoryBackend};

pub mod filters;
pub mod seed;
mod categories;
mod comments;
mod posts;
mod session;
mod stats;
mod users;

pub use comments::ModeratedComment;
pub use filters::{ApprovalStatus, CommentFilter, PostFilter, PublishStatus};
pub use seed::SeedReport;
pub use stats::DashboardStats;

/// Fixed storage keys.
pub mod keys {
    pub const USERS: &str = "blog_users";
    pub const POSTS: &str = "blog_posts";
    pub const CATEGORIES: &str = "blog_categories";
    pub const COMMENTS: &str = "blog_comments";
    pub const AUTH_USER: &str = "blog_auth_user";
}

pub struct RecordStore {
    users: JsonCollection<User>,
    posts: JsonCollection<Post>,
    categories: JsonCollection<Category>,
    comments: JsonCollection<Comment>,
    session: JsonDocument<UserProfile>,
    write_lock: Mutex<()>,
}

impl RecordStore {
    /// Wrap a backend without touching it. Collections that were never
    /// written read as empty until [`RecordStore::initialize`] runs.
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            users: JsonCollection::new(backend.clone(), keys::USERS),
            posts: JsonCollection::new(backend.clone(), keys::POSTS),
            categories: JsonCollection::new(backend.clone(), keys::CATEGORIES),
            comments: JsonCollection::new(backend.clone(), keys::COMMENTS),
            session: JsonDocument::new(backend, keys::AUTH_USER),
            write_lock: Mutex::new(()),
        }
    }

    /// Build a store over `backend` and seed any uninitialized collection.
    pub async fn open(backend: Arc<dyn KvBackend>) -> Result<Arc<Self>, StoreError> {
        let store = Self::new(backend);
        store.initialize().await?;
        Ok(Arc::new(store))
    }

    /// File-backed store rooted at `dir`, seeded on first use.
    pub async fn open_dir<P: Into<PathBuf>>(dir: P) -> Result<Arc<Self>, StoreError> {
        let backend = FileBackend::new(dir).await?;
        Self::open(Arc::new(backend)).await
    }

    /// Seeded store that lives only in memory.
    pub async fn in_memory() -> Result<Arc<Self>, StoreError> {
        Self::open(Arc::new(MemoryBackend::new())).await
    }

    async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}

fn now() -> DateTime<Utc> {
    Utc::now()
}
