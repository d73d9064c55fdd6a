use tracing::{debug, info};

use models::UserProfile;

use super::RecordStore;
use crate::auth::password::verify_password;
use crate::errors::StoreError;

impl RecordStore {
    /// Check an email/password pair. On success the user, without password,
    /// becomes the current session record and is returned; on failure the
    /// existing session is left untouched and `None` comes back.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<UserProfile>, StoreError> {
        let Some(user) = self.user_by_email(email).await? else {
            debug!("authenticate: unknown email");
            return Ok(None);
        };
        if !verify_password(password, &user.password) {
            debug!(user_id = %user.id, "authenticate: password mismatch");
            return Ok(None);
        }
        let profile = user.profile();
        let _guard = self.lock().await;
        self.session.store(&profile).await?;
        info!(user_id = %profile.id, "session_started");
        Ok(Some(profile))
    }

    pub async fn current_user(&self) -> Result<Option<UserProfile>, StoreError> {
        self.session.load().await
    }

    /// Clear the session record. Logging out with no session is fine.
    pub async fn logout(&self) -> Result<(), StoreError> {
        let _guard = self.lock().await;
        self.session.clear().await?;
        info!("session_cleared");
        Ok(())
    }
}
