//! Authentication handlers.
//!
//! Sign-up, sign-in/out, password recovery and email verification. The
//! password strength of the three credential-setting routes is enforced
//! by the policy gate before any of these run.

use axum::{
    extract::{Extension, Query, State},
    http::{
        header::{InvalidHeaderValue, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::SessionAccessor;
use crate::api::AppState;
use crate::config::{
    Config, PATH_CHANGE_PASSWORD, PATH_RESET_PASSWORD, PATH_SIGN_UP_EMAIL, SESSION_COOKIE_NAME,
};
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::extract_request_token;
use crate::types::MessageResponse;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password (checked against the strength policy)
    #[schema(example = "Str0ng&Passw0rd!")]
    pub password: String,
    /// User display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "John Doe")]
    pub name: String,
}

/// Sign-in request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[schema(example = "Str0ng&Passw0rd!")]
    pub password: String,
}

/// Forgot-password request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    /// Email address to send the reset link to
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
}

/// Reset-password request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    /// One-time token from the reset email
    pub token: String,
    /// Replacement password
    #[schema(example = "Str0ng&Passw0rd!")]
    pub new_password: String,
}

/// Change-password request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// The password being replaced
    pub current_password: String,
    /// Replacement password
    #[schema(example = "Str0ng&Passw0rd!")]
    pub new_password: String,
    /// Also sign out every other session of this user
    #[serde(default)]
    pub revoke_other_sessions: bool,
}

/// Email-verification query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VerifyEmailParams {
    /// One-time token from the verification email
    pub token: String,
}

/// Session response returned on sign-in and session reads
#[derive(Debug, serde::Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserResponse,
    pub expires_at: DateTime<Utc>,
    /// Raw session token; present only in the sign-in response so
    /// non-browser clients can use Bearer auth
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Create authentication routes.
///
/// Paths are absolute so the policy gate's allow-list matches what the
/// middleware observes on the wire.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(PATH_SIGN_UP_EMAIL, post(sign_up))
        .route("/auth/sign-in/email", post(sign_in))
        .route("/auth/sign-out", post(sign_out))
        .route("/auth/sign-out/all", post(sign_out_all))
        .route("/auth/session", get(session))
        .route("/auth/forgot-password", post(forgot_password))
        .route(PATH_RESET_PASSWORD, post(reset_password))
        .route(PATH_CHANGE_PASSWORD, post(change_password))
        .route("/auth/verify-email", get(verify_email))
}

/// Build the `HttpOnly` cookie holding the session token.
fn session_cookie(config: &Config, token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE_NAME,
        token,
        config.session_ttl_seconds()
    );
    if config.session_cookie_secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Build the cookie that removes the session from the browser.
fn clear_session_cookie(config: &Config) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE_NAME
    );
    if config.session_cookie_secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Register a new account by email
#[utoipa::path(
    post,
    path = "/auth/sign-up/email",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation error or weak password"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .auth_service
        .register(payload.email, payload.password, payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/auth/sign-in/email",
    tag = "Authentication",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Session opened", body = SessionResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignInRequest>,
) -> AppResult<Response> {
    let issued = state
        .auth_service
        .sign_in(payload.email, payload.password)
        .await?;

    let body = SessionResponse {
        user: UserResponse::from(issued.session.user),
        expires_at: issued.session.expires_at,
        token: Some(issued.token.clone()),
    };

    let mut response = Json(body).into_response();
    if let Ok(cookie) = session_cookie(&state.config, &issued.token) {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }

    Ok(response)
}

/// Close the current session
#[utoipa::path(
    post,
    path = "/auth/sign-out",
    tag = "Authentication",
    responses(
        (status = 204, description = "Session cleared")
    )
)]
pub async fn sign_out(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    if let Some(token) = extract_request_token(&headers) {
        state.auth_service.sign_out(&token).await?;
    }

    // Always clear the cookie, even when no session record was found
    let mut response = StatusCode::NO_CONTENT.into_response();
    if let Ok(cookie) = clear_session_cookie(&state.config) {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }

    Ok(response)
}

/// Close every session of the current user ("log out everywhere")
#[utoipa::path(
    post,
    path = "/auth/sign-out/all",
    tag = "Authentication",
    responses(
        (status = 204, description = "All sessions cleared"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn sign_out_all(
    State(state): State<AppState>,
    Extension(accessor): Extension<SessionAccessor>,
) -> AppResult<Response> {
    let user = accessor.require_user().await?;
    let removed = state.auth_service.sign_out_all(user.id).await?;
    tracing::info!(user = %user.id, sessions = removed, "Signed out everywhere");

    let mut response = StatusCode::NO_CONTENT.into_response();
    if let Ok(cookie) = clear_session_cookie(&state.config) {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }

    Ok(response)
}

/// Read the current session
#[utoipa::path(
    get,
    path = "/auth/session",
    tag = "Authentication",
    responses(
        (status = 200, description = "Session is active", body = SessionResponse),
        (status = 204, description = "No active session")
    )
)]
pub async fn session(Extension(accessor): Extension<SessionAccessor>) -> Response {
    match accessor.get_session().await {
        Some(session) => Json(SessionResponse {
            user: UserResponse::from(session.user),
            expires_at: session.expires_at,
            token: None,
        })
        .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Request a password-reset email
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = "Authentication",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Generic acknowledgement", body = MessageResponse)
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.auth_service.forgot_password(payload.email).await?;

    // Same answer for known and unknown addresses
    Ok(Json(MessageResponse::new(
        "If that email address is registered, a reset link has been sent",
    )))
}

/// Complete a password reset
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    tag = "Authentication",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password replaced", body = MessageResponse),
        (status = 400, description = "Weak password or invalid/expired token")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .auth_service
        .reset_password(payload.token, payload.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password has been reset")))
}

/// Change the password of the signed-in user
#[utoipa::path(
    post,
    path = "/auth/change-password",
    tag = "Authentication",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Weak password"),
        (status = 401, description = "Not signed in or wrong current password")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(accessor): Extension<SessionAccessor>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = accessor.require_user().await?;

    // The session performing the change survives a revocation
    let active_token = extract_request_token(&headers);
    state
        .auth_service
        .change_password(
            user.id,
            payload.current_password,
            payload.new_password,
            payload.revoke_other_sessions,
            active_token,
        )
        .await?;

    Ok(Json(MessageResponse::new("Password has been changed")))
}

/// Confirm an email address from a verification link
#[utoipa::path(
    get,
    path = "/auth/verify-email",
    tag = "Authentication",
    params(VerifyEmailParams),
    responses(
        (status = 200, description = "Email verified", body = UserResponse),
        (status = 400, description = "Invalid or expired token")
    )
)]
pub async fn verify_email(
    State(state): State<AppState>,
    Query(params): Query<VerifyEmailParams>,
) -> AppResult<Json<UserResponse>> {
    let user = state.auth_service.verify_email(params.token).await?;
    Ok(Json(UserResponse::from(user)))
}
