//! Per-request session access.
//!
//! A [`SessionAccessor`] is created for every request and dropped with
//! it. The first `get_session` call resolves the request headers through
//! the auth service; later calls in the same request reuse the result.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::api::AppState;
use crate::domain::{Session, User};
use crate::errors::{AppError, AppResult};
use crate::services::AuthService;

/// Memoized session lookup scoped to one request.
///
/// Cloning shares the memo cell, so every handler and layer that sees
/// this request observes the same resolution. Nothing is shared across
/// requests: the middleware builds a fresh accessor each time.
#[derive(Clone)]
pub struct SessionAccessor {
    inner: Arc<AccessorInner>,
}

struct AccessorInner {
    auth: Arc<dyn AuthService>,
    headers: HeaderMap,
    cell: OnceCell<Option<Session>>,
}

impl SessionAccessor {
    pub fn new(auth: Arc<dyn AuthService>, headers: HeaderMap) -> Self {
        Self {
            inner: Arc::new(AccessorInner {
                auth,
                headers,
                cell: OnceCell::new(),
            }),
        }
    }

    /// Resolve the session for this request, invoking the underlying
    /// lookup at most once.
    ///
    /// Lookup failures collapse to `None`: callers only distinguish
    /// "signed in" from "not signed in".
    pub async fn get_session(&self) -> Option<Session> {
        self.inner
            .cell
            .get_or_init(|| async {
                match self.inner.auth.resolve_session(&self.inner.headers).await {
                    Ok(session) => session,
                    Err(e) => {
                        tracing::warn!("Session resolution failed: {}", e);
                        None
                    }
                }
            })
            .await
            .clone()
    }

    /// Current user, or 401 when the request carries no session.
    pub async fn require_user(&self) -> AppResult<User> {
        self.get_session()
            .await
            .map(|s| s.user)
            .ok_or(AppError::Unauthorized)
    }

    /// Current admin user: 401 without a session, 403 for non-admins.
    pub async fn require_admin(&self) -> AppResult<User> {
        let user = self.require_user().await?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(AppError::Forbidden)
        }
    }
}

/// Attach a fresh [`SessionAccessor`] to every request.
///
/// Resolution stays lazy: requests whose handlers never ask for the
/// session cost nothing here beyond a header clone.
pub async fn session_context_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let accessor = SessionAccessor::new(state.auth_service.clone(), request.headers().clone());
    request.extensions_mut().insert(accessor);
    next.run(request).await
}
