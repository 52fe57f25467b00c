//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and
//! infrastructure from request handlers and middleware.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database};
use crate::services::{AuthService, Mailer, ServiceContainer, Services, UserService};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Redis cache (rate limiting)
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create application state from connected infrastructure and config.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        mailer: Arc<dyn Mailer>,
        config: Config,
    ) -> Self {
        let container = Services::from_connection(database.get_connection(), config.clone(), mailer);

        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            cache,
            database,
            config,
        }
    }

    /// Create application state with manually injected services (tests).
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        cache: Arc<Cache>,
        database: Arc<Database>,
        config: Config,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            cache,
            database,
            config,
        }
    }
}
