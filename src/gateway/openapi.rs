//! OpenAPI / Swagger UI documentation
//!
//! - Swagger UI: `http://localhost:3000/docs`
//! - OpenAPI JSON: `http://localhost:3000/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::gateway::handlers::HealthResponse;
use crate::user_auth::handlers::ProbeResponse;
use crate::user_auth::service::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};

/// Bearer session token security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token from POST /api/v1/auth/login. \
                             Fixed 2-hour lifetime; not renewable.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ward Access API",
        version = "1.0.0",
        description = "Credential and session-authorization service for the ward management suite.",
        license(name = "MIT")
    ),
    paths(
        crate::user_auth::handlers::register,
        crate::user_auth::handlers::login,
        crate::user_auth::handlers::protected_probe,
        crate::user_auth::handlers::clerk_probe,
        crate::user_auth::handlers::change_password,
        crate::gateway::handlers::health_check,
    ),
    components(schemas(
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        LoginResponse,
        ChangePasswordRequest,
        ProbeResponse,
        HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login (establish identity)"),
        (name = "Session", description = "Operations behind the session guard"),
        (name = "System", description = "Health and diagnostics")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().unwrap();
        assert!(json.contains("/api/v1/auth/register"));
        assert!(json.contains("/api/v1/user/protected/clerk"));
        assert!(json.contains("bearer_jwt"));
    }
}
