//! User authentication and session authorization.
//!
//! ## Components
//! - `password`: one-way salted credential hashing (argon2)
//! - `token`: signed session tokens (HS256, fixed TTL)
//! - `error`: auth error taxonomy
//! - `roles`: role-based routing hints and allowed-role sets
//! - `service`: registration, login, password change
//! - `middleware`: session guard (bearer extraction + role gate)
//! - `handlers`: axum handlers for the auth endpoints

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod password;
pub mod roles;
pub mod service;
pub mod token;

// Re-export for convenience
pub use error::{AuthError, TokenError};
pub use middleware::{authorize, clerk_guard, extract_bearer, jwt_auth_middleware};
pub use service::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    UserAuthService,
};
pub use token::{Claims, TokenCodec};
