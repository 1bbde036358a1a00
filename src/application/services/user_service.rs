//! User Service
//!
//! Registration and "who am I" lookups.

use std::sync::Arc;

use tracing::{info, instrument};

use super::auth_service::hash_password;
use crate::domain::{NewUser, User, UserRepository};
use crate::shared::error::AppError;

pub const MISSING_EMAIL: &str = "Missing email";
pub const MISSING_PASSWORD: &str = "Missing password";
pub const ALREADY_EXIST: &str = "Already exist";

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a new account.
    ///
    /// # Errors
    /// Validation errors `Missing email`, `Missing password` or
    /// `Already exist`.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AppError> {
        let email = email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::validation(MISSING_EMAIL))?;
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::validation(MISSING_PASSWORD))?;

        if self.users.email_exists(email).await? {
            return Err(AppError::validation(ALREADY_EXIST));
        }

        let user = self
            .users
            .create(NewUser {
                email: email.to_string(),
                password_hash: hash_password(password)?,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Total number of registered users.
    pub async fn count(&self) -> Result<u64, AppError> {
        self.users.count().await
    }
}
