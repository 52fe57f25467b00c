//! Session repository implementation.
//!
//! Sessions are looked up by token digest only; callers digest the raw
//! token before reaching this layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::session::{self, ActiveModel, Entity as SessionEntity};
use crate::domain::SessionRecord;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Session repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session
    async fn create(
        &self,
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> AppResult<SessionRecord>;

    /// Find a session by token digest
    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<SessionRecord>>;

    /// Delete the session with this token digest. Returns rows removed.
    async fn delete_by_token_hash(&self, token_hash: &str) -> AppResult<u64>;

    /// Delete every session of a user, optionally sparing one token digest
    /// (the session performing the revocation). Returns rows removed.
    async fn delete_for_user(
        &self,
        user_id: Uuid,
        except_token_hash: Option<String>,
    ) -> AppResult<u64>;

    /// Delete every session (application purge). Returns rows removed.
    async fn delete_all(&self) -> AppResult<u64>;
}

/// Concrete implementation of SessionRepository
pub struct SessionStore {
    db: DatabaseConnection,
}

impl SessionStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepository for SessionStore {
    async fn create(
        &self,
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> AppResult<SessionRecord> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            token_hash: Set(token_hash),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
            expires_at: Set(expires_at),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(SessionRecord::from(model))
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<SessionRecord>> {
        let result = SessionEntity::find()
            .filter(session::Column::TokenHash.eq(token_hash))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(SessionRecord::from))
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> AppResult<u64> {
        let result = SessionEntity::delete_many()
            .filter(session::Column::TokenHash.eq(token_hash))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn delete_for_user(
        &self,
        user_id: Uuid,
        except_token_hash: Option<String>,
    ) -> AppResult<u64> {
        let mut query = SessionEntity::delete_many().filter(session::Column::UserId.eq(user_id));

        if let Some(token_hash) = except_token_hash {
            query = query.filter(session::Column::TokenHash.ne(token_hash));
        }

        let result = query.exec(&self.db).await.map_err(AppError::from)?;
        Ok(result.rows_affected)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = SessionEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
