//! Admin handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::delete,
    Router,
};

use crate::api::middleware::SessionAccessor;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::PurgeSummary;

/// Create admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/application", delete(delete_application))
}

/// Delete the entire application's data.
///
/// Irreversible. 401 without a session, 403 for non-admins.
#[utoipa::path(
    delete,
    path = "/admin/application",
    tag = "Admin",
    responses(
        (status = 200, description = "Application data removed", body = PurgeSummary),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn delete_application(
    State(state): State<AppState>,
    Extension(accessor): Extension<SessionAccessor>,
) -> AppResult<Json<PurgeSummary>> {
    let admin = accessor.require_admin().await?;
    tracing::warn!(admin = %admin.id, "Application purge requested");

    let summary = state.user_service.delete_application().await?;
    Ok(Json(summary))
}
