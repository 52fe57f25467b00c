//! One-time token repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::auth_token::{self, ActiveModel, Entity as TokenEntity};
use crate::domain::TokenPurpose;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// A consumed one-time token: who it was issued to.
#[derive(Debug, Clone)]
pub struct ConsumedToken {
    pub user_id: Uuid,
}

/// One-time token repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a new one-time token
    async fn create(
        &self,
        user_id: Uuid,
        token_hash: String,
        purpose: TokenPurpose,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Look up and delete a token by digest + purpose (single use).
    ///
    /// Returns `None` for unknown, already-used, wrong-purpose, or
    /// expired tokens (expired rows are removed on the way out).
    async fn consume(&self, token_hash: &str, purpose: TokenPurpose)
        -> AppResult<Option<ConsumedToken>>;

    /// Delete every token of a user for one purpose. Returns rows removed.
    async fn delete_for_user(&self, user_id: Uuid, purpose: TokenPurpose) -> AppResult<u64>;

    /// Delete every token (application purge). Returns rows removed.
    async fn delete_all(&self) -> AppResult<u64>;
}

/// Concrete implementation of TokenRepository
pub struct TokenStore {
    db: DatabaseConnection,
}

impl TokenStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TokenRepository for TokenStore {
    async fn create(
        &self,
        user_id: Uuid,
        token_hash: String,
        purpose: TokenPurpose,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            token_hash: Set(token_hash),
            user_id: Set(user_id),
            purpose: Set(purpose.as_str().to_string()),
            created_at: Set(Utc::now()),
            expires_at: Set(expires_at),
        };

        active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn consume(
        &self,
        token_hash: &str,
        purpose: TokenPurpose,
    ) -> AppResult<Option<ConsumedToken>> {
        let found = TokenEntity::find()
            .filter(auth_token::Column::TokenHash.eq(token_hash))
            .filter(auth_token::Column::Purpose.eq(purpose.as_str()))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        let Some(model) = found else {
            return Ok(None);
        };

        // Single use: the row goes away whether or not it is still valid
        TokenEntity::delete_by_id(model.id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if model.expires_at <= Utc::now() {
            return Ok(None);
        }

        Ok(Some(ConsumedToken {
            user_id: model.user_id,
        }))
    }

    async fn delete_for_user(&self, user_id: Uuid, purpose: TokenPurpose) -> AppResult<u64> {
        let result = TokenEntity::delete_many()
            .filter(auth_token::Column::UserId.eq(user_id))
            .filter(auth_token::Column::Purpose.eq(purpose.as_str()))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = TokenEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
