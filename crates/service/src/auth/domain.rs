use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::UserProfile;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
}

/// JWT claims carried by session tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// user email
    pub sub: String,
    pub uid: Uuid,
    /// admin flag at issue time
    pub adm: bool,
    pub iat: usize,
    pub exp: usize,
}
