use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gompa_model::SessionUser;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use crate::database::ports::identity::{AllowList, IdentityProvider, hash_session_token};
use crate::error::{CatalogError, Result};

/// Looks bearer tokens up in the `sessions` table written by the login flow.
#[derive(Debug, Clone)]
pub struct PostgresIdentityProvider {
    pool: PgPool,
}

impl PostgresIdentityProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityProvider for PostgresIdentityProvider {
    async fn current_user(&self, token: &str) -> Result<Option<SessionUser>> {
        let token_hash = hash_session_token(token);

        let row = sqlx::query(
            r#"
            SELECT user_id, email, expires_at, revoked
            FROM sessions
            WHERE token_hash = $1
            "#,
        )
        .bind(&token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CatalogError::Fetch(format!("Failed to look up session: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let revoked: bool = row
            .try_get("revoked")
            .map_err(|e| CatalogError::Internal(format!("Failed to read revoked: {e}")))?;
        let expires_at: DateTime<Utc> = row
            .try_get("expires_at")
            .map_err(|e| CatalogError::Internal(format!("Failed to read expires_at: {e}")))?;

        if revoked || expires_at < Utc::now() {
            debug!(revoked, %expires_at, "session no longer valid");
            return Ok(None);
        }

        let id: Uuid = row
            .try_get("user_id")
            .map_err(|e| CatalogError::Internal(format!("Failed to read user_id: {e}")))?;
        let email: Option<String> = row
            .try_get("email")
            .map_err(|e| CatalogError::Internal(format!("Failed to read email: {e}")))?;

        Ok(Some(SessionUser { id, email }))
    }
}

#[derive(Debug, Clone)]
pub struct PostgresAllowList {
    pool: PgPool,
}

impl PostgresAllowList {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AllowList for PostgresAllowList {
    async fn is_allow_listed(&self, user_id: Uuid) -> Result<bool> {
        let found: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM admin_users WHERE id = $1)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    CatalogError::Fetch(format!("Failed to check admin allow-list: {e}"))
                })?;
        Ok(found)
    }
}
