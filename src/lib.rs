//! Ward Access - credential and session-authorization service
//!
//! The auth backend for the ward management suite: registers staff
//! accounts with salted password hashes, authenticates credentials, issues
//! signed time-bounded session tokens carrying identity and role claims,
//! verifies those tokens on protected operations, and enforces role-based
//! authorization.
//!
//! # Modules
//!
//! - [`account`] - Account model and storage repository
//! - [`user_auth`] - Hashing, tokens, session guard, auth service
//! - [`gateway`] - HTTP surface (axum router, shared state, response types)
//! - [`db`] - PostgreSQL connection management
//! - [`config`] - YAML configuration per environment
//! - [`logging`] - tracing subscriber setup

pub mod account;
pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod user_auth;

// Convenient re-exports at crate root
pub use account::{Account, AccountRepository, Database};
pub use user_auth::{AuthError, Claims, TokenCodec, TokenError, UserAuthService};
