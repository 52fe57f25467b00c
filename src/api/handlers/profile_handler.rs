//! Profile handlers for the signed-in user.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::SessionAccessor;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;

/// Profile update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
}

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_profile).patch(update_profile))
}

/// Get the profile of the signed-in user
#[utoipa::path(
    get,
    path = "/me",
    tag = "Profile",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn get_profile(
    Extension(accessor): Extension<SessionAccessor>,
) -> AppResult<Json<UserResponse>> {
    let user = accessor.require_user().await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update the profile of the signed-in user
#[utoipa::path(
    patch,
    path = "/me",
    tag = "Profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(accessor): Extension<SessionAccessor>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = accessor.require_user().await?;
    let updated = state.user_service.update_name(user.id, payload.name).await?;
    Ok(Json(UserResponse::from(updated)))
}
