use async_trait::async_trait;
use gompa_model::SessionUser;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::Result;

/// Resolves a bearer token to the user behind a live session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` for unknown, expired or revoked sessions.
    async fn current_user(&self, token: &str) -> Result<Option<SessionUser>>;
}

/// Membership check against the administrator allow-list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AllowList: Send + Sync {
    async fn is_allow_listed(&self, user_id: Uuid) -> Result<bool>;
}

/// Session tokens are only ever stored and compared as their sha256 digest.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hash_is_lowercase_hex_sha256() {
        let hash = hash_session_token("abc");
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
