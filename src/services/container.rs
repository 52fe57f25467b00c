//! Service Container - Centralized service construction and access.
//!
//! Builds the repositories and services once at startup; everything
//! downstream receives `Arc<dyn …>` handles.

use std::sync::Arc;

use super::{AuthService, Authenticator, Mailer, UserManager, UserService};
use crate::config::Config;
use crate::infra::{SessionStore, TokenStore, UserStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
}

impl Services {
    /// Create a new service container with pre-built services
    pub fn new(auth_service: Arc<dyn AuthService>, user_service: Arc<dyn UserService>) -> Self {
        Self {
            auth_service,
            user_service,
        }
    }

    /// Create service container from a database connection, config and mailer
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: Config,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let users = Arc::new(UserStore::new(db.clone()));
        let sessions = Arc::new(SessionStore::new(db.clone()));
        let tokens = Arc::new(TokenStore::new(db));

        let auth_service = Arc::new(Authenticator::new(
            users.clone(),
            sessions.clone(),
            tokens.clone(),
            mailer,
            config,
        ));
        let user_service = Arc::new(UserManager::new(users, sessions, tokens));

        Self {
            auth_service,
            user_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }
}
