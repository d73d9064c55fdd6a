use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use tracing::{debug, info, instrument, warn};

use models::{NewUser, UserProfile};

use super::domain::{AuthSession, Claims, LoginInput, RegisterInput};
use super::errors::AuthError;
use crate::store::RecordStore;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub min_password_len: usize,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self { jwt_secret: jwt_secret.into(), token_ttl: chrono::Duration::hours(12), min_password_len: 6 }
    }
}

/// Auth business service independent of web framework
pub struct AuthService {
    store: Arc<RecordStore>,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(store: Arc<RecordStore>, cfg: AuthConfig) -> Self { Self { store, cfg } }

    pub fn store(&self) -> &Arc<RecordStore> { &self.store }

    /// Register a new reader account and log it in.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, domain::RegisterInput};
    /// use service::store::RecordStore;
    /// let store = tokio_test::block_on(RecordStore::in_memory()).unwrap();
    /// let svc = AuthService::new(store, AuthConfig::new("doc-test-secret"));
    /// let input = RegisterInput { name: "Test".into(), email: "user@example.com".into(), password: "Secret123".into() };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.email, "user@example.com");
    /// assert!(!session.user.is_admin);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        if input.password.chars().count() < self.cfg.min_password_len {
            return Err(AuthError::Validation(format!("password too short (>={})", self.cfg.min_password_len)));
        }
        if let Some(existing) = self.store.user_by_email(&input.email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let user = self
            .store
            .save_user(NewUser { name: input.name, email: input.email.clone(), password: input.password.clone(), is_admin: false, avatar: None })
            .await?;
        info!(user_id = %user.id, email = %user.email, "user_registered");

        self.login(LoginInput { email: input.email, password: input.password }).await
    }

    /// Authenticate a user, record the session and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, domain::LoginInput};
    /// use service::store::RecordStore;
    /// let store = tokio_test::block_on(RecordStore::in_memory()).unwrap();
    /// let svc = AuthService::new(store, AuthConfig::new("doc-test-secret"));
    /// let input = LoginInput { email: "admin@example.com".into(), password: "admin123".into() };
    /// let session = tokio_test::block_on(svc.login(input)).unwrap();
    /// assert!(session.user.is_admin);
    /// let claims = svc.verify_token(&session.token).unwrap();
    /// assert_eq!(claims.uid, session.user.id);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let Some(user) = self.store.authenticate(&input.email, &input.password).await? else {
            warn!("login rejected");
            return Err(AuthError::Unauthorized);
        };
        let token = self.issue_token(&user)?;
        Ok(AuthSession { user, token })
    }

    pub async fn logout(&self) -> Result<(), AuthError> {
        self.store.logout().await?;
        Ok(())
    }

    pub fn issue_token(&self, user: &UserProfile) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user.email.clone(),
            uid: user.id,
            adm: user.is_admin,
            iat: now.timestamp() as usize,
            exp: (now + self.cfg.token_ttl).timestamp() as usize,
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Signature and expiry check only; see [`AuthService::user_for_token`].
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let key = DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Resolve a token to the current state of its user. A token for a user
    /// that has since been deleted is rejected.
    pub async fn user_for_token(&self, token: &str) -> Result<UserProfile, AuthError> {
        let claims = self.verify_token(token)?;
        let user = self.store.user_by_id(claims.uid).await?.ok_or(AuthError::Unauthorized)?;
        Ok(user.profile())
    }
}
