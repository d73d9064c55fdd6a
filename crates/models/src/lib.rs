//! Entity types for the blog record store.
//!
//! Every entity has a stored record type (what lives in the JSON collection)
//! and, where clients create it, a `New*` input carrying only the fields a
//! client may supply. Inputs are normalized and validated before the store
//! assigns ids and timestamps.

pub mod errors;
pub mod slug;
pub mod user;
pub mod category;
pub mod post;
pub mod comment;

pub use category::{Category, NewCategory};
pub use comment::{Comment, NewComment};
pub use post::{NewPost, Post};
pub use user::{NewUser, User, UserProfile};

#[cfg(test)]
mod tests;
