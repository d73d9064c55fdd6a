//! Shared helpers for the InsightBlog workspace: logging setup, runtime
//! environment checks and the health response type used by the server.

pub mod types;
pub mod utils;
pub mod env;
