//! Axum handlers for the auth endpoints.

use axum::{Extension, Json, extract::State, http::StatusCode};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::error::AuthError;
use super::service::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};
use super::token::Claims;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResponse, error_codes};

type ErrorReply = (StatusCode, Json<ApiResponse<()>>);

fn invalid_input(detail: impl std::fmt::Display) -> ErrorReply {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error(
            error_codes::INVALID_PARAMETER,
            format!("Invalid input: {}", detail),
        )),
    )
}

/// Marker payload for protected probes
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ProbeResponse {
    #[schema(example = "This is a protected route")]
    pub message: String,
    pub username: String,
    pub roles: Vec<String>,
}

/// Register a new account
///
/// POST /api/v1/auth/register
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<RegisterResponse>),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username or email already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ErrorReply> {
    req.validate().map_err(invalid_input)?;

    match state.user_auth.register(req).await {
        Ok(account_id) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(RegisterResponse { account_id })),
        )),
        Err(AuthError::DuplicateAccount) => {
            tracing::warn!("Registration rejected: username or email already exists");
            Err(AuthError::DuplicateAccount.reply())
        }
        Err(e) => Err(e.reply()),
    }
}

/// Login with username and password
///
/// POST /api/v1/auth/login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Unknown username"),
        (status = 401, description = "Wrong password"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LoginResponse>>), ErrorReply> {
    req.validate().map_err(invalid_input)?;

    match state.user_auth.login(req).await {
        Ok(resp) => Ok((StatusCode::OK, Json(ApiResponse::success(resp)))),
        // Unknown username keeps the original 400 contract. Distinguishable
        // from a wrong password, which permits username enumeration; see
        // DESIGN notes before changing either side.
        Err(AuthError::AccountNotFound) => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(
                error_codes::ACCOUNT_NOT_FOUND,
                "Cannot find user",
            )),
        )),
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Login failed: wrong password");
            Err(AuthError::InvalidCredentials.reply())
        }
        Err(e) => Err(e.reply()),
    }
}

/// Protected probe
///
/// GET /api/v1/user/protected
#[utoipa::path(
    get,
    path = "/api/v1/user/protected",
    responses(
        (status = 200, description = "Session verified", body = ApiResponse<ProbeResponse>),
        (status = 401, description = "Missing, invalid, or expired token")
    ),
    security(("bearer_jwt" = [])),
    tag = "Session"
)]
pub async fn protected_probe(
    Extension(claims): Extension<Claims>,
) -> (StatusCode, Json<ApiResponse<ProbeResponse>>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success(ProbeResponse {
            message: "This is a protected route".to_string(),
            username: claims.username,
            roles: claims.roles,
        })),
    )
}

/// Clerk-only probe
///
/// GET /api/v1/user/protected/clerk
#[utoipa::path(
    get,
    path = "/api/v1/user/protected/clerk",
    responses(
        (status = 200, description = "Clerk session verified", body = ApiResponse<ProbeResponse>),
        (status = 401, description = "Missing, invalid, or expired token"),
        (status = 403, description = "Caller holds no allowed role")
    ),
    security(("bearer_jwt" = [])),
    tag = "Session"
)]
pub async fn clerk_probe(
    Extension(claims): Extension<Claims>,
) -> (StatusCode, Json<ApiResponse<ProbeResponse>>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success(ProbeResponse {
            message: "This is a clerk-only route".to_string(),
            username: claims.username,
            roles: claims.roles,
        })),
    )
}

/// Change the caller's password
///
/// POST /api/v1/user/password
#[utoipa::path(
    post,
    path = "/api/v1/user/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<String>),
        (status = 400, description = "Old password is incorrect"),
        (status = 404, description = "Account no longer exists"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_jwt" = [])),
    tag = "Session"
)]
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<(StatusCode, Json<ApiResponse<String>>), ErrorReply> {
    req.validate().map_err(invalid_input)?;

    // The account ID comes from the verified claims, never the body
    let account_id = claims.sub.parse::<Uuid>().map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error(
                error_codes::TOKEN_MALFORMED,
                "Invalid account ID in token",
            )),
        )
    })?;

    match state.user_auth.change_password(account_id, req).await {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(ApiResponse::success(
                "Password changed successfully".to_string(),
            )),
        )),
        // Original contract: wrong old password is a 400, not a 401
        Err(AuthError::InvalidCredentials) => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(
                error_codes::INVALID_CREDENTIALS,
                "Old password is incorrect",
            )),
        )),
        Err(e) => Err(e.reply()),
    }
}
