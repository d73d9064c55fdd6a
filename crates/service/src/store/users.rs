use tracing::info;
use uuid::Uuid;

use models::user::normalize_email;
use models::{NewUser, User};

use super::{now, RecordStore};
use crate::auth::password::hash_password;
use crate::errors::StoreError;

fn same_email(a: &str, b: &str) -> bool {
    normalize_email(a) == normalize_email(b)
}

impl RecordStore {
    pub async fn users(&self) -> Result<Vec<User>, StoreError> {
        self.users.load().await
    }

    pub async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.load().await?.into_iter().find(|u| u.id == id))
    }

    /// Emails match case-insensitively.
    pub async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.load().await?.into_iter().find(|u| same_email(&u.email, email)))
    }

    /// Register a user. The password is stored as an argon2 hash; the email
    /// must not belong to another account.
    pub async fn save_user(&self, input: NewUser) -> Result<User, StoreError> {
        input.validate()?;
        let user = User {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            password: hash_password(&input.password)?,
            is_admin: input.is_admin,
            avatar: input.avatar.filter(|a| !a.trim().is_empty()),
            created_at: now(),
        };

        let _guard = self.lock().await;
        self.users
            .update(|users| {
                if users.iter().any(|u| same_email(&u.email, &user.email)) {
                    return Err(StoreError::conflict(format!("email already registered: {}", user.email)));
                }
                users.push(user.clone());
                Ok(())
            })
            .await?;
        info!(user_id = %user.id, email = %user.email, "user_saved");
        Ok(user)
    }

    /// Replace a user's profile fields. `id`, `createdAt` and the password
    /// hash are kept from the stored record; use [`RecordStore::change_password`]
    /// to rotate a password. Returns `None` if the id is unknown.
    pub async fn update_user(&self, user: User) -> Result<Option<User>, StoreError> {
        user.validate()?;
        let _guard = self.lock().await;
        let updated = self
            .users
            .update(|users| {
                if users.iter().any(|u| u.id != user.id && same_email(&u.email, &user.email)) {
                    return Err(StoreError::conflict(format!("email already registered: {}", user.email)));
                }
                let Some(existing) = users.iter_mut().find(|u| u.id == user.id) else {
                    return Ok(None);
                };
                existing.name = user.name.trim().to_string();
                existing.email = user.email.trim().to_string();
                existing.is_admin = user.is_admin;
                existing.avatar = user.avatar.clone();
                Ok(Some(existing.clone()))
            })
            .await?;
        if let Some(u) = &updated {
            info!(user_id = %u.id, "user_updated");
        }
        Ok(updated)
    }

    /// Returns `false` if the id is unknown.
    pub async fn change_password(&self, id: Uuid, new_password: &str) -> Result<bool, StoreError> {
        models::errors::require("password", new_password)?;
        let hash = hash_password(new_password)?;
        let _guard = self.lock().await;
        let changed = self
            .users
            .update(|users| match users.iter_mut().find(|u| u.id == id) {
                Some(u) => {
                    u.password = hash;
                    Ok(true)
                }
                None => Ok(false),
            })
            .await?;
        if changed {
            info!(user_id = %id, "password_changed");
        }
        Ok(changed)
    }

    /// Delete a user together with their comments, and end their session if
    /// it is the current one. Refused while the user still authors posts.
    /// Returns whether the user existed.
    pub async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.lock().await;
        if self.posts.load().await?.iter().any(|p| p.author_id == id) {
            return Err(StoreError::conflict("user still authors posts"));
        }

        let existed = self
            .users
            .update(|users| {
                let before = users.len();
                users.retain(|u| u.id != id);
                Ok(users.len() != before)
            })
            .await?;

        let removed_comments = self
            .comments
            .update(|comments| {
                let before = comments.len();
                comments.retain(|c| c.user_id != id);
                Ok(before - comments.len())
            })
            .await?;

        if self.session.load().await?.is_some_and(|s| s.id == id) {
            self.session.clear().await?;
        }

        if existed {
            info!(user_id = %id, removed_comments, "user_deleted");
        }
        Ok(existed)
    }
}
