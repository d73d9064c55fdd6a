//! Service layer for the blog record store.
//! - `storage` holds the key/value backends and typed JSON access.
//! - `store` exposes the blog operations over users, posts, categories and comments.
//! - `auth` issues and verifies tokens on top of the store's session operations.

pub mod errors;
pub mod auth;
pub mod pagination;
pub mod runtime;
pub mod storage;
pub mod store;

pub use errors::StoreError;
pub use store::RecordStore;
