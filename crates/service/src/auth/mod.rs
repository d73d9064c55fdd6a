//! Auth module: registration, login and token handling on top of the record
//! store's user collection and session record.

pub mod domain;
pub mod errors;
pub mod password;
pub mod service;

pub use service::{AuthConfig, AuthService};
