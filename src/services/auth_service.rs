//! Authentication service - account lifecycle and session resolution.
//!
//! Owns every credential-touching operation: registration, sign-in/out,
//! password reset and change, email verification, and the header-to-session
//! resolution the per-request accessor memoizes.

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{Config, BEARER_TOKEN_PREFIX, SESSION_COOKIE_NAME};
use crate::domain::{token, Password, Session, TokenPurpose, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{SessionRepository, TokenRepository, UserRepository};
use crate::jobs::EmailJob;
use crate::services::Mailer;

/// A freshly created session together with its raw token.
///
/// The token leaves the process exactly once, inside the sign-in
/// response and cookie; only its digest is stored.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session: Session,
    pub token: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and queue the verification email
    async fn register(&self, email: String, password: String, name: String) -> AppResult<User>;

    /// Verify credentials and open a session
    async fn sign_in(&self, email: String, password: String) -> AppResult<IssuedSession>;

    /// Close the session behind this raw token (no-op when unknown)
    async fn sign_out(&self, token: &str) -> AppResult<()>;

    /// Close every session of a user. Returns sessions removed.
    async fn sign_out_all(&self, user_id: Uuid) -> AppResult<u64>;

    /// Resolve the request headers into a session, if any.
    ///
    /// Expired or unknown tokens and missing users all resolve to `None`;
    /// this method never surfaces a "why".
    async fn resolve_session(&self, headers: &HeaderMap) -> AppResult<Option<Session>>;

    /// Start a password reset: queue the reset email when the address is known
    async fn forgot_password(&self, email: String) -> AppResult<()>;

    /// Complete a password reset from an emailed token
    async fn reset_password(&self, reset_token: String, new_password: String) -> AppResult<()>;

    /// Change the password of a signed-in user
    async fn change_password(
        &self,
        user_id: Uuid,
        current_password: String,
        new_password: String,
        revoke_other_sessions: bool,
        active_token: Option<String>,
    ) -> AppResult<()>;

    /// Confirm an email address from an emailed token
    async fn verify_email(&self, verification_token: String) -> AppResult<User>;
}

/// Pull the raw session token out of a request's headers.
///
/// Bearer header wins over the cookie so API clients can override a
/// stale browser cookie.
pub fn extract_request_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
    {
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in cookies.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        if parts.next() == Some(SESSION_COOKIE_NAME) {
            if let Some(value) = parts.next() {
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Normalize an email for lookup/uniqueness checks.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    tokens: Arc<dyn TokenRepository>,
    mailer: Arc<dyn Mailer>,
    config: Config,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        tokens: Arc<dyn TokenRepository>,
        mailer: Arc<dyn Mailer>,
        config: Config,
    ) -> Self {
        Self {
            users,
            sessions,
            tokens,
            mailer,
            config,
        }
    }

    /// Issue a one-time token for a user, replacing any earlier tokens
    /// of the same purpose, and return the raw value for the email link.
    async fn issue_one_time_token(&self, user_id: Uuid, purpose: TokenPurpose) -> AppResult<String> {
        let raw = token::generate();
        let expires_at = chrono::Utc::now() + purpose.ttl();

        self.tokens.delete_for_user(user_id, purpose).await?;
        self.tokens
            .create(user_id, token::digest(&raw), purpose, expires_at)
            .await?;

        Ok(raw)
    }

    fn link(&self, path_and_query: &str) -> String {
        let base = self.config.app_base_url.trim_end_matches('/');
        format!("{}{}", base, path_and_query)
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, email: String, password: String, name: String) -> AppResult<User> {
        let email = normalize_email(&email);

        // Email format is validated by the handler's ValidatedJson extractor
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self.users.create(email, password_hash, name).await?;

        // Verification is best-effort: the account exists either way and
        // the user can sign in before confirming the address.
        match self
            .issue_one_time_token(user.id, TokenPurpose::EmailVerification)
            .await
        {
            Ok(raw) => {
                let url = self.link(&format!("/auth/verify-email?token={}", raw));
                if let Err(e) = self
                    .mailer
                    .send(EmailJob::email_verification(&user.email, &url))
                    .await
                {
                    tracing::warn!(user = %user.id, "Failed to queue verification email: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!(user = %user.id, "Failed to issue verification token: {}", e);
            }
        }

        Ok(user)
    }

    async fn sign_in(&self, email: String, password: String) -> AppResult<IssuedSession> {
        let email = normalize_email(&email);
        let user_result = self.users.find_by_email(&email).await?;

        // SECURITY: Perform password verification even if user doesn't exist
        // to prevent timing attacks that could enumerate valid emails.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let password_valid = Password::from_hash(password_hash.to_string()).verify(&password);

        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe to unwrap since we verified user_exists is true
        let user = user_result.unwrap();

        let raw = token::generate();
        let expires_at = chrono::Utc::now() + Duration::hours(self.config.session_ttl_hours);
        let record = self
            .sessions
            .create(user.id, token::digest(&raw), expires_at)
            .await?;

        Ok(IssuedSession {
            session: Session::new(record, user),
            token: raw,
        })
    }

    async fn sign_out(&self, token: &str) -> AppResult<()> {
        self.sessions.delete_by_token_hash(&token::digest(token)).await?;
        Ok(())
    }

    async fn sign_out_all(&self, user_id: Uuid) -> AppResult<u64> {
        self.sessions.delete_for_user(user_id, None).await
    }

    async fn resolve_session(&self, headers: &HeaderMap) -> AppResult<Option<Session>> {
        let Some(raw) = extract_request_token(headers) else {
            return Ok(None);
        };

        let Some(record) = self
            .sessions
            .find_by_token_hash(&token::digest(&raw))
            .await?
        else {
            return Ok(None);
        };

        if record.is_expired() {
            // Lazy cleanup: the row is useless from here on
            self.sessions
                .delete_by_token_hash(&token::digest(&raw))
                .await?;
            return Ok(None);
        }

        let Some(user) = self.users.find_by_id(record.user_id).await? else {
            return Ok(None);
        };

        Ok(Some(Session::new(record, user)))
    }

    async fn forgot_password(&self, email: String) -> AppResult<()> {
        let email = normalize_email(&email);

        // Unknown addresses get the same outward behavior as known ones;
        // the caller always answers with a generic message.
        let Some(user) = self.users.find_by_email(&email).await? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let raw = self
            .issue_one_time_token(user.id, TokenPurpose::PasswordReset)
            .await?;
        let url = self.link(&format!("/reset-password?token={}", raw));

        self.mailer
            .send(EmailJob::password_reset(&user.email, &url))
            .await
    }

    async fn reset_password(&self, reset_token: String, new_password: String) -> AppResult<()> {
        let consumed = self
            .tokens
            .consume(&token::digest(&reset_token), TokenPurpose::PasswordReset)
            .await?
            .ok_or(AppError::InvalidToken)?;

        let password_hash = Password::new(&new_password)?.into_string();
        self.users
            .update_password(consumed.user_id, password_hash)
            .await?;

        // Whoever held the old password is signed out everywhere
        self.sessions.delete_for_user(consumed.user_id, None).await?;

        Ok(())
    }

    async fn change_password(
        &self,
        user_id: Uuid,
        current_password: String,
        new_password: String,
        revoke_other_sessions: bool,
        active_token: Option<String>,
    ) -> AppResult<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !Password::from_hash(user.password_hash).verify(&current_password) {
            return Err(AppError::InvalidCredentials);
        }

        let password_hash = Password::new(&new_password)?.into_string();
        self.users.update_password(user_id, password_hash).await?;

        if revoke_other_sessions {
            let keep = active_token.map(|t| token::digest(&t));
            self.sessions.delete_for_user(user_id, keep).await?;
        }

        Ok(())
    }

    async fn verify_email(&self, verification_token: String) -> AppResult<User> {
        let consumed = self
            .tokens
            .consume(
                &token::digest(&verification_token),
                TokenPurpose::EmailVerification,
            )
            .await?
            .ok_or(AppError::InvalidToken)?;

        self.users.mark_email_verified(consumed.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::domain::{SessionRecord, UserRole};
    use crate::infra::repositories::{
        ConsumedToken, MockSessionRepository, MockTokenRepository, MockUserRepository,
    };
    use crate::services::MockMailer;

    fn test_config() -> Config {
        Config {
            database_url: String::new(),
            redis_url: String::new(),
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            app_base_url: "http://localhost:3000".to_string(),
            session_ttl_hours: 24,
            session_cookie_secure: false,
        }
    }

    fn test_user(password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            name: "Test User".to_string(),
            role: UserRole::User,
            email_verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn authenticator(
        users: MockUserRepository,
        sessions: MockSessionRepository,
        tokens: MockTokenRepository,
        mailer: MockMailer,
    ) -> Authenticator {
        Authenticator::new(
            Arc::new(users),
            Arc::new(sessions),
            Arc::new(tokens),
            Arc::new(mailer),
            test_config(),
        )
    }

    fn cookie_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE_NAME, token)).unwrap(),
        );
        headers
    }

    #[test]
    fn token_extraction_prefers_bearer_over_cookie() {
        let mut headers = cookie_headers("cookie-token");
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer bearer-token"),
        );

        assert_eq!(
            extract_request_token(&headers),
            Some("bearer-token".to_string())
        );
    }

    #[test]
    fn token_extraction_finds_the_session_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!(
                "theme=dark; {}=the-token; lang=en",
                SESSION_COOKIE_NAME
            ))
            .unwrap(),
        );

        assert_eq!(extract_request_token(&headers), Some("the-token".to_string()));
    }

    #[test]
    fn token_extraction_ignores_unrelated_headers() {
        assert_eq!(extract_request_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(extract_request_token(&headers), None);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .with(eq("taken@example.com"))
            .returning(|_| Ok(Some(test_user("Existing1Pass"))));

        let auth = authenticator(
            users,
            MockSessionRepository::new(),
            MockTokenRepository::new(),
            MockMailer::new(),
        );

        let result = auth
            .register(
                "Taken@Example.com ".to_string(),
                "Str0ngPassword".to_string(),
                "Dup".to_string(),
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn register_never_stores_a_weak_password() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        // No expect_create: the mock panics if registration reaches storage

        let auth = authenticator(
            users,
            MockSessionRepository::new(),
            MockTokenRepository::new(),
            MockMailer::new(),
        );

        let result = auth
            .register(
                "new@example.com".to_string(),
                "weak".to_string(),
                "New".to_string(),
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn register_queues_a_verification_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_create().returning(|email, hash, name| {
            let mut user = test_user("Placeholder1");
            user.email = email;
            user.password_hash = hash;
            user.name = name;
            Ok(user)
        });

        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_delete_for_user()
            .returning(|_, _| Ok(0));
        tokens.expect_create().returning(|_, _, _, _| Ok(()));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|job| {
                job.to == "new@example.com" && job.body.contains("/auth/verify-email?token=")
            })
            .times(1)
            .returning(|_| Ok(()));

        let auth = authenticator(users, MockSessionRepository::new(), tokens, mailer);

        let user = auth
            .register(
                "new@example.com".to_string(),
                "Str0ngPassword".to_string(),
                "New".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(user.email, "new@example.com");
        // The hash, not the password, goes to storage
        assert_ne!(user.password_hash, "Str0ngPassword");
    }

    #[tokio::test]
    async fn sign_in_rejects_unknown_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let auth = authenticator(
            users,
            MockSessionRepository::new(),
            MockTokenRepository::new(),
            MockMailer::new(),
        );

        let result = auth
            .sign_in("ghost@example.com".to_string(), "Whatever1Pass".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn sign_in_rejects_wrong_password() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(test_user("Correct1Password"))));

        let auth = authenticator(
            users,
            MockSessionRepository::new(),
            MockTokenRepository::new(),
            MockMailer::new(),
        );

        let result = auth
            .sign_in("test@example.com".to_string(), "Wrong1Password".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn sign_in_issues_a_session_storing_only_the_digest() {
        let user = test_user("Correct1Password");
        let user_id = user.id;

        let mut users = MockUserRepository::new();
        let found = user.clone();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(found.clone())));

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_create()
            .withf(move |uid, _, _| *uid == user_id)
            .returning(|user_id, _, expires_at| {
                Ok(SessionRecord {
                    id: Uuid::new_v4(),
                    user_id,
                    created_at: Utc::now(),
                    expires_at,
                })
            });

        let auth = authenticator(users, sessions, MockTokenRepository::new(), MockMailer::new());

        let issued = auth
            .sign_in("test@example.com".to_string(), "Correct1Password".to_string())
            .await
            .unwrap();

        assert_eq!(issued.session.user.id, user_id);
        assert!(!issued.token.is_empty());
        assert!(issued.session.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn resolve_session_without_token_skips_the_lookup() {
        // No expectations set: any repository call panics
        let auth = authenticator(
            MockUserRepository::new(),
            MockSessionRepository::new(),
            MockTokenRepository::new(),
            MockMailer::new(),
        );

        let resolved = auth.resolve_session(&HeaderMap::new()).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn resolve_session_finds_cookie_sessions() {
        let user = test_user("Whatever1Pass");
        let user_id = user.id;
        let raw = token::generate();
        let expected_digest = token::digest(&raw);

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_by_token_hash()
            .withf(move |hash| hash == expected_digest)
            .returning(move |_| {
                Ok(Some(SessionRecord {
                    id: Uuid::new_v4(),
                    user_id,
                    created_at: Utc::now(),
                    expires_at: Utc::now() + Duration::hours(1),
                }))
            });

        let mut users = MockUserRepository::new();
        let found = user.clone();
        users
            .expect_find_by_id()
            .with(eq(user_id))
            .returning(move |_| Ok(Some(found.clone())));

        let auth = authenticator(users, sessions, MockTokenRepository::new(), MockMailer::new());

        let resolved = auth.resolve_session(&cookie_headers(&raw)).await.unwrap();
        assert_eq!(resolved.unwrap().user.id, user_id);
    }

    #[tokio::test]
    async fn resolve_session_drops_expired_records() {
        let raw = token::generate();

        let mut sessions = MockSessionRepository::new();
        sessions.expect_find_by_token_hash().returning(|_| {
            Ok(Some(SessionRecord {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                created_at: Utc::now() - Duration::hours(2),
                expires_at: Utc::now() - Duration::hours(1),
            }))
        });
        sessions
            .expect_delete_by_token_hash()
            .times(1)
            .returning(|_| Ok(1));

        let auth = authenticator(
            MockUserRepository::new(),
            sessions,
            MockTokenRepository::new(),
            MockMailer::new(),
        );

        let resolved = auth.resolve_session(&cookie_headers(&raw)).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn forgot_password_is_silent_for_unknown_addresses() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        // No mailer/token expectations: nothing may be issued or sent

        let auth = authenticator(
            users,
            MockSessionRepository::new(),
            MockTokenRepository::new(),
            MockMailer::new(),
        );

        assert!(auth
            .forgot_password("ghost@example.com".to_string())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn forgot_password_queues_a_reset_link() {
        let user = test_user("Whatever1Pass");

        let mut users = MockUserRepository::new();
        let found = user.clone();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(found.clone())));

        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_delete_for_user()
            .with(eq(user.id), eq(TokenPurpose::PasswordReset))
            .returning(|_, _| Ok(0));
        tokens
            .expect_create()
            .withf(|_, _, purpose, _| *purpose == TokenPurpose::PasswordReset)
            .returning(|_, _, _, _| Ok(()));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|job| job.body.contains("/reset-password?token="))
            .times(1)
            .returning(|_| Ok(()));

        let auth = authenticator(users, MockSessionRepository::new(), tokens, mailer);

        assert!(auth
            .forgot_password("test@example.com".to_string())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn reset_password_rejects_unknown_tokens() {
        let mut tokens = MockTokenRepository::new();
        tokens.expect_consume().returning(|_, _| Ok(None));

        let auth = authenticator(
            MockUserRepository::new(),
            MockSessionRepository::new(),
            tokens,
            MockMailer::new(),
        );

        let result = auth
            .reset_password("bogus".to_string(), "New1Password".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidToken));
    }

    #[tokio::test]
    async fn reset_password_updates_hash_and_revokes_sessions() {
        let user_id = Uuid::new_v4();

        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_consume()
            .withf(|_, purpose| *purpose == TokenPurpose::PasswordReset)
            .returning(move |_, _| Ok(Some(ConsumedToken { user_id })));

        let mut users = MockUserRepository::new();
        users
            .expect_update_password()
            .withf(move |id, hash| *id == user_id && hash != "New1Password")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_delete_for_user()
            .withf(move |id, except| *id == user_id && except.is_none())
            .times(1)
            .returning(|_, _| Ok(2));

        let auth = authenticator(users, sessions, tokens, MockMailer::new());

        assert!(auth
            .reset_password(token::generate(), "New1Password".to_string())
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn change_password_requires_the_current_one() {
        let user = test_user("Current1Password");
        let user_id = user.id;

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        let auth = authenticator(
            users,
            MockSessionRepository::new(),
            MockTokenRepository::new(),
            MockMailer::new(),
        );

        let result = auth
            .change_password(
                user_id,
                "Wrong1Password".to_string(),
                "New1Password".to_string(),
                false,
                None,
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn change_password_can_spare_the_active_session() {
        let user = test_user("Current1Password");
        let user_id = user.id;
        let active = token::generate();
        let active_digest = token::digest(&active);

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        users
            .expect_update_password()
            .times(1)
            .returning(|_, _| Ok(()));

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_delete_for_user()
            .withf(move |id, except| *id == user_id && except.as_deref() == Some(active_digest.as_str()))
            .times(1)
            .returning(|_, _| Ok(1));

        let auth = authenticator(users, sessions, MockTokenRepository::new(), MockMailer::new());

        assert!(auth
            .change_password(
                user_id,
                "Current1Password".to_string(),
                "New1Password".to_string(),
                true,
                Some(active),
            )
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn verify_email_marks_the_user() {
        let user_id = Uuid::new_v4();

        let mut tokens = MockTokenRepository::new();
        tokens
            .expect_consume()
            .withf(|_, purpose| *purpose == TokenPurpose::EmailVerification)
            .returning(move |_, _| Ok(Some(ConsumedToken { user_id })));

        let mut users = MockUserRepository::new();
        users
            .expect_mark_email_verified()
            .with(eq(user_id))
            .returning(|id| {
                let mut user = test_user("Whatever1Pass");
                user.id = id;
                user.email_verified = true;
                Ok(user)
            });

        let auth = authenticator(
            users,
            MockSessionRepository::new(),
            tokens,
            MockMailer::new(),
        );

        let verified = auth.verify_email(token::generate()).await.unwrap();
        assert!(verified.email_verified);
    }
}
