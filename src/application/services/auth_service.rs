//! Authentication Service
//!
//! Verifies email/password pairs and manages the session lifecycle
//! (connect issues a token, disconnect revokes it).

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{debug, info, instrument};

use crate::domain::{User, UserRepository};
use crate::infrastructure::cache::SessionStore;
use crate::shared::error::AppError;

/// Hash a password using Argon2id with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against a stored PHC string.
///
/// A stored hash that does not parse counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Credential verification and session management.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: SessionStore,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, sessions: SessionStore) -> Self {
        Self { users, sessions }
    }

    /// Check an email/password pair against the stored hash.
    ///
    /// Every rejection is `Unauthorized`, whichever part failed.
    #[instrument(skip(self, password))]
    pub async fn verify(&self, email: &str, password: &str) -> Result<User, AppError> {
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Unauthorized);
        }

        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(password, &user.password_hash) {
            debug!("Password mismatch");
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }

    /// Verify credentials and open a new session.
    #[instrument(skip(self, password))]
    pub async fn connect(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self.verify(email, password).await?;
        let token = self.sessions.create(user.id).await?;

        info!(user_id = %user.id, "User connected");
        Ok(token)
    }

    /// Close the session behind `token`.
    ///
    /// # Errors
    /// `Unauthorized` when the token has no live session.
    #[instrument(skip_all)]
    pub async fn disconnect(&self, token: &str) -> Result<(), AppError> {
        if self.sessions.revoke(token).await? {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}
