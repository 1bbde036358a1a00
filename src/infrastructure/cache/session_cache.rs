//! Session Store
//!
//! Opaque session tokens kept in the cache under `auth_<token>`.
//! The cache's TTL is the session expiry; nothing refreshes it.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, warn};

use super::{keys, Cache};
use crate::domain::EntityId;
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Default session lifetime: 24 hours.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;

/// Number of random bytes in a token (256 bits).
const TOKEN_BYTES: usize = 32;

/// Issues, resolves and revokes session tokens.
#[derive(Clone)]
pub struct SessionStore {
    cache: Arc<dyn Cache>,
    ttl: u64,
}

impl SessionStore {
    /// Create a session store with the default 24h TTL
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self::with_ttl(cache, DEFAULT_SESSION_TTL_SECS)
    }

    pub fn with_ttl(cache: Arc<dyn Cache>, ttl: u64) -> Self {
        Self { cache, ttl }
    }

    pub fn ttl(&self) -> u64 {
        self.ttl
    }

    /// Start a session for `user_id` and return its token.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn create(&self, user_id: EntityId) -> Result<String, AppError> {
        let token = generate_token();
        self.cache
            .set_ex(&keys::auth(&token), &user_id.to_string(), self.ttl)
            .await?;

        metrics::record_session_issued();
        debug!(token = %fingerprint(&token), ttl = self.ttl, "Session created");
        Ok(token)
    }

    /// Resolve a token to its user. Unknown and expired tokens yield `None`.
    #[instrument(skip_all, fields(token = %fingerprint(token)))]
    pub async fn resolve(&self, token: &str) -> Result<Option<EntityId>, AppError> {
        if token.is_empty() {
            return Ok(None);
        }

        let Some(value) = self.cache.get(&keys::auth(token)).await? else {
            return Ok(None);
        };

        match value.parse::<EntityId>() {
            Ok(user_id) => Ok(Some(user_id)),
            Err(e) => {
                warn!(error = %e, "Session holds an unparseable user id");
                Ok(None)
            }
        }
    }

    /// Delete a session. Returns whether one existed.
    #[instrument(skip_all, fields(token = %fingerprint(token)))]
    pub async fn revoke(&self, token: &str) -> Result<bool, AppError> {
        if token.is_empty() {
            return Ok(false);
        }

        let existed = self.cache.delete(&keys::auth(token)).await?;
        debug!(existed, "Session revoked");
        Ok(existed)
    }
}

fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Short, non-reversible tag for a token so logs never carry the secret.
fn fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    digest[..6].iter().map(|b| format!("{:02x}", b)).collect()
}
