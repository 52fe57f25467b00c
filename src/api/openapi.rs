//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{admin_handler, auth_handler, profile_handler};
use crate::config::SESSION_COOKIE_NAME;
use crate::domain::{UserResponse, UserRole};
use crate::services::PurgeSummary;
use crate::types::MessageResponse;

/// OpenAPI documentation for the portero identity service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "portero",
        version = "0.1.0",
        description = "Identity and session API: email sign-up, sessions, password recovery",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::sign_up,
        auth_handler::sign_in,
        auth_handler::sign_out,
        auth_handler::sign_out_all,
        auth_handler::session,
        auth_handler::forgot_password,
        auth_handler::reset_password,
        auth_handler::change_password,
        auth_handler::verify_email,
        // Profile endpoints
        profile_handler::get_profile,
        profile_handler::update_profile,
        // Admin endpoints
        admin_handler::delete_application,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            MessageResponse,
            PurgeSummary,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::SignInRequest,
            auth_handler::ForgotPasswordRequest,
            auth_handler::ResetPasswordRequest,
            auth_handler::ChangePasswordRequest,
            auth_handler::SessionResponse,
            // Profile types
            profile_handler::UpdateProfileRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account and session lifecycle"),
        (name = "Profile", description = "Signed-in user's profile"),
        (name = "Admin", description = "Administrative operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier: session cookie plus Bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Session token from /auth/sign-in/email"))
                        .build(),
                ),
            );
        }
    }
}
