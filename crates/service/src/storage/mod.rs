//! Storage abstractions for the record store
//!
//! A [`backend::KvBackend`] stores string blobs by key; the JSON helpers in
//! [`json_collection`] give typed access to one array or one object per key.

pub mod backend;
pub mod json_collection;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use json_collection::{JsonCollection, JsonDocument};
