//! Core business logic for the authentication system.
//!
//! Registration, login, and password change. Orchestrates the password
//! hasher, the token codec, and the account repository. Hashing is
//! CPU-bound by design, so every hash/verify runs on the blocking pool
//! rather than a request-serving thread.

use serde::{Deserialize, Serialize};
use sqlx::{Pool, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::error::AuthError;
use super::password;
use super::roles;
use super::token::{Claims, TokenCodec};
use crate::account::AccountRepository;

/// Account Registration Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "alice")]
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[schema(example = "alice@ward.example")]
    #[validate(email(message = "email must be valid"))]
    pub email: String,
    #[schema(example = "correct horse battery")]
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[schema(example = json!(["nurse"]))]
    #[validate(length(min = 1, message = "at least one role is required"))]
    pub roles: Vec<String>,
}

/// Login Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice")]
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[schema(example = "correct horse battery")]
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Password Change Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "old password must not be empty"))]
    pub old_password: String,
    #[validate(length(min = 8, message = "new password must be at least 8 characters"))]
    pub new_password: String,
}

/// Registration confirmation
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub account_id: Uuid,
}

/// Login response (session token plus display info)
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub username: String,
    pub roles: Vec<String>,
    /// Destination URL for the caller's highest-priority role, if any.
    /// A UI hint, never an authorization input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

pub struct UserAuthService {
    db: Pool<Postgres>,
    tokens: TokenCodec,
}

impl UserAuthService {
    pub fn new(db: Pool<Postgres>, jwt_secret: &str, token_ttl_secs: u64) -> Self {
        Self {
            db,
            tokens: TokenCodec::new(jwt_secret, token_ttl_secs),
        }
    }

    /// Register a new account.
    ///
    /// Exactly one row is inserted on success, zero on any rejection.
    /// Uniqueness of username and email comes from the store's unique
    /// indexes; the resulting violation maps to `DuplicateAccount`.
    pub async fn register(&self, req: RegisterRequest) -> Result<Uuid, AuthError> {
        // 1. Hash password on the blocking pool
        let plaintext = req.password;
        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
            .await
            .map_err(|e| AuthError::Store(format!("hash task failed: {}", e)))?
            .map_err(|e| AuthError::Store(format!("password hashing failed: {}", e)))?;

        // 2. Single INSERT; no existence pre-check
        let account_id =
            AccountRepository::insert(&self.db, &req.username, &req.email, &password_hash, &req.roles)
                .await
                .map_err(AuthError::from_store)?;

        tracing::info!("Registered account {} for '{}'", account_id, req.username);
        Ok(account_id)
    }

    /// Validate a username/password pair and issue a session token.
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AuthError> {
        // 1. Find account by username
        let account = AccountRepository::get_by_username(&self.db, &req.username)
            .await
            .map_err(AuthError::from_store)?
            .ok_or(AuthError::AccountNotFound)?;

        // 2. Verify password on the blocking pool. An unreadable stored
        //    hash is a store-side fault, not a credential mismatch.
        let stored_hash = account.password_hash.clone();
        let plaintext = req.password;
        let password_ok =
            tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &stored_hash))
                .await
                .map_err(|e| AuthError::Store(format!("verify task failed: {}", e)))?
                .map_err(|e| AuthError::Store(format!("stored hash unreadable: {}", e)))?;

        if !password_ok {
            return Err(AuthError::InvalidCredentials);
        }

        // 3. Issue session token
        let token = self
            .tokens
            .issue(account.account_id, &account.username, account.roles.clone())
            .map_err(|e| AuthError::Store(format!("token encode failed: {}", e)))?;

        let redirect_to = roles::destination_for(&account.roles).map(str::to_string);

        tracing::info!("Login for account {}", account.account_id);
        Ok(LoginResponse {
            message: format!("Welcome {}! You are logged in successfully", account.username),
            token,
            username: account.username,
            roles: account.roles,
            redirect_to,
        })
    }

    /// Verify a session token and recover its claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, super::error::TokenError> {
        self.tokens.verify(token)
    }

    /// Rotate an account's password after re-proving the old one.
    ///
    /// The account ID comes from verified session claims, never from the
    /// request body. Previously issued tokens stay valid until expiry.
    pub async fn change_password(
        &self,
        account_id: Uuid,
        req: ChangePasswordRequest,
    ) -> Result<(), AuthError> {
        // 1. Load account; it may have been deleted since the session began
        let account = AccountRepository::get_by_id(&self.db, account_id)
            .await
            .map_err(AuthError::from_store)?
            .ok_or(AuthError::AccountNotFound)?;

        // 2. Verify old password
        let stored_hash = account.password_hash;
        let old_plaintext = req.old_password;
        let old_ok = tokio::task::spawn_blocking(move || {
            password::verify_password(&old_plaintext, &stored_hash)
        })
        .await
        .map_err(|e| AuthError::Store(format!("verify task failed: {}", e)))?
        .map_err(|e| AuthError::Store(format!("stored hash unreadable: {}", e)))?;

        if !old_ok {
            return Err(AuthError::InvalidCredentials);
        }

        // 3. Hash new password with a fresh salt and persist
        let new_plaintext = req.new_password;
        let new_hash =
            tokio::task::spawn_blocking(move || password::hash_password(&new_plaintext))
                .await
                .map_err(|e| AuthError::Store(format!("hash task failed: {}", e)))?
                .map_err(|e| AuthError::Store(format!("password hashing failed: {}", e)))?;

        let updated = AccountRepository::update_password_hash(&self.db, account_id, &new_hash)
            .await
            .map_err(AuthError::from_store)?;
        if !updated {
            // Deleted between the lookup and the update
            return Err(AuthError::AccountNotFound);
        }

        tracing::info!("Password changed for account {}", account_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "p1-longenough".to_string(),
            roles: vec!["nurse".to_string()],
        };
        assert!(ok.validate().is_ok());

        let empty_roles = RegisterRequest {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "p1-longenough".to_string(),
            roles: vec![],
        };
        assert!(empty_roles.validate().is_err());

        let short_password = RegisterRequest {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "short".to_string(),
            roles: vec!["nurse".to_string()],
        };
        assert!(short_password.validate().is_err());

        let bad_email = RegisterRequest {
            username: "alice".to_string(),
            email: "not-an-email".to_string(),
            password: "p1-longenough".to_string(),
            roles: vec!["nurse".to_string()],
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_change_password_request_validation() {
        let ok = ChangePasswordRequest {
            old_password: "old-password".to_string(),
            new_password: "new-password".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short_new = ChangePasswordRequest {
            old_password: "old-password".to_string(),
            new_password: "short".to_string(),
        };
        assert!(short_new.validate().is_err());
    }
}
