//! User service - profile operations and the admin application purge.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::infra::{SessionRepository, TokenRepository, UserRepository};

/// Row counts removed by an application purge.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurgeSummary {
    pub users_deleted: u64,
    pub sessions_deleted: u64,
    pub tokens_deleted: u64,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Update the display name
    async fn update_name(&self, id: Uuid, name: String) -> AppResult<User>;

    /// Remove every account, session and pending token.
    ///
    /// Backs the admin "delete application" action; there is no undo.
    async fn delete_application(&self) -> AppResult<PurgeSummary>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    tokens: Arc<dyn TokenRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        tokens: Arc<dyn TokenRepository>,
    ) -> Self {
        Self {
            users,
            sessions,
            tokens,
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn update_name(&self, id: Uuid, name: String) -> AppResult<User> {
        self.users.update_name(id, name).await
    }

    async fn delete_application(&self) -> AppResult<PurgeSummary> {
        // Dependents first so the counts stay meaningful even without
        // cascade support
        let tokens_deleted = self.tokens.delete_all().await?;
        let sessions_deleted = self.sessions.delete_all().await?;
        let users_deleted = self.users.delete_all().await?;

        tracing::warn!(
            users = users_deleted,
            sessions = sessions_deleted,
            tokens = tokens_deleted,
            "Application data purged"
        );

        Ok(PurgeSummary {
            users_deleted,
            sessions_deleted,
            tokens_deleted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::domain::{User, UserRole};
    use crate::infra::repositories::{
        MockSessionRepository, MockTokenRepository, MockUserRepository,
    };

    fn test_user(id: Uuid) -> User {
        User {
            id,
            email: "test@example.com".to_string(),
            password_hash: "hashed".to_string(),
            name: "Test User".to_string(),
            role: UserRole::User,
            email_verified: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn get_user_success() {
        let user_id = Uuid::new_v4();

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(user_id))
            .returning(|id| Ok(Some(test_user(id))));

        let service = UserManager::new(
            Arc::new(users),
            Arc::new(MockSessionRepository::new()),
            Arc::new(MockTokenRepository::new()),
        );

        assert_eq!(service.get_user(user_id).await.unwrap().id, user_id);
    }

    #[tokio::test]
    async fn get_user_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));

        let service = UserManager::new(
            Arc::new(users),
            Arc::new(MockSessionRepository::new()),
            Arc::new(MockTokenRepository::new()),
        );

        let result = service.get_user(Uuid::new_v4()).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn update_name_passes_through() {
        let user_id = Uuid::new_v4();

        let mut users = MockUserRepository::new();
        users
            .expect_update_name()
            .with(eq(user_id), eq("Renamed".to_string()))
            .returning(|id, name| {
                let mut user = test_user(id);
                user.name = name;
                Ok(user)
            });

        let service = UserManager::new(
            Arc::new(users),
            Arc::new(MockSessionRepository::new()),
            Arc::new(MockTokenRepository::new()),
        );

        let updated = service
            .update_name(user_id, "Renamed".to_string())
            .await
            .unwrap();
        assert_eq!(updated.name, "Renamed");
    }

    #[tokio::test]
    async fn purge_reports_what_it_removed() {
        let mut users = MockUserRepository::new();
        users.expect_delete_all().times(1).returning(|| Ok(3));

        let mut sessions = MockSessionRepository::new();
        sessions.expect_delete_all().times(1).returning(|| Ok(5));

        let mut tokens = MockTokenRepository::new();
        tokens.expect_delete_all().times(1).returning(|| Ok(2));

        let service = UserManager::new(Arc::new(users), Arc::new(sessions), Arc::new(tokens));

        let summary = service.delete_application().await.unwrap();
        assert_eq!(summary.users_deleted, 3);
        assert_eq!(summary.sessions_deleted, 5);
        assert_eq!(summary.tokens_deleted, 2);
    }
}
