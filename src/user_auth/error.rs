//! Authentication error taxonomy.
//!
//! Every failure a credential or session operation can produce, with a
//! structured code, a stable name, and an HTTP status. All errors are
//! terminal for the request that triggered them; nothing is retried.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::gateway::types::{ApiResponse, error_codes};

/// Session token verification failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Signature does not match the server secret (wrong key or tampering)
    #[error("token signature verification failed")]
    InvalidSignature,
    /// Embedded expiry is in the past
    #[error("token has expired")]
    Expired,
    /// Token cannot be parsed at all
    #[error("token is malformed")]
    Malformed,
}

/// Authentication and authorization errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username or email already exists")]
    DuplicateAccount,
    #[error("account not found")]
    AccountNotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("missing authorization header")]
    MissingToken,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("insufficient role for this operation")]
    Forbidden,
    /// Store or internal failure. The detail string is logged server-side
    /// only; responses carry a generic message.
    #[error("internal error: {0}")]
    Store(String),
}

impl AuthError {
    /// Map a store error onto the taxonomy. A unique-index violation is the
    /// sole source of `DuplicateAccount`; everything else is an internal
    /// store failure.
    pub fn from_store(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::DuplicateAccount,
            _ => Self::Store(e.to_string()),
        }
    }

    /// Get error code as i32.
    pub fn code(&self) -> i32 {
        match self {
            Self::DuplicateAccount => error_codes::DUPLICATE_ACCOUNT,
            Self::AccountNotFound => error_codes::ACCOUNT_NOT_FOUND,
            Self::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            Self::MissingToken => error_codes::MISSING_AUTH,
            Self::Token(TokenError::Malformed) => error_codes::TOKEN_MALFORMED,
            Self::Token(TokenError::InvalidSignature) => error_codes::TOKEN_INVALID_SIGNATURE,
            Self::Token(TokenError::Expired) => error_codes::TOKEN_EXPIRED,
            Self::Forbidden => error_codes::FORBIDDEN,
            Self::Store(_) => error_codes::INTERNAL_ERROR,
        }
    }

    /// Get error name string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuplicateAccount => "DUPLICATE_ACCOUNT",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::MissingToken => "MISSING_AUTH",
            Self::Token(TokenError::Malformed) => "TOKEN_MALFORMED",
            Self::Token(TokenError::InvalidSignature) => "TOKEN_INVALID_SIGNATURE",
            Self::Token(TokenError::Expired) => "TOKEN_EXPIRED",
            Self::Forbidden => "FORBIDDEN",
            Self::Store(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::DuplicateAccount => StatusCode::CONFLICT,
            Self::AccountNotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Response message. Never includes store/driver detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::DuplicateAccount => "Username or email already exists",
            Self::AccountNotFound => "Account not found",
            Self::InvalidCredentials => "Invalid username or password",
            Self::MissingToken => "Missing Authorization header",
            Self::Token(TokenError::Malformed) => "Invalid token format",
            Self::Token(TokenError::InvalidSignature) => "Token signature verification failed",
            Self::Token(TokenError::Expired) => "Token has expired",
            Self::Forbidden => "Insufficient role for this operation",
            Self::Store(_) => "Internal server error",
        }
    }

    /// Build the error reply for handlers. Store detail is logged here,
    /// at the last point before it would leave the process.
    pub fn reply(&self) -> (StatusCode, Json<ApiResponse<()>>) {
        if let Self::Store(detail) = self {
            tracing::error!("Internal failure: {}", detail);
        }
        (
            self.http_status(),
            Json(ApiResponse::<()>::error(self.code(), self.public_message())),
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.reply().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AuthError::DuplicateAccount.code(), 1004);
        assert_eq!(AuthError::MissingToken.code(), 2001);
        assert_eq!(AuthError::Token(TokenError::Expired).code(), 2005);
    }

    #[test]
    fn test_error_names() {
        assert_eq!(AuthError::DuplicateAccount.name(), "DUPLICATE_ACCOUNT");
        assert_eq!(
            AuthError::Token(TokenError::InvalidSignature).name(),
            "TOKEN_INVALID_SIGNATURE"
        );
    }

    #[test]
    fn test_http_status() {
        assert_eq!(AuthError::DuplicateAccount.http_status(), StatusCode::CONFLICT);
        assert_eq!(AuthError::AccountNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::Forbidden.http_status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::Token(TokenError::Expired).http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::Store("boom".into()).http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_detail_never_in_public_message() {
        let err = AuthError::Store("password=hunter2 connection refused".into());
        assert_eq!(err.public_message(), "Internal server error");
    }
}
