//! Account storage module
//!
//! PostgreSQL-backed storage for registered accounts.

pub mod models;
pub mod repository;

// Re-export commonly used types
pub use models::Account;
pub use repository::AccountRepository;

// Re-export Database from top-level db module
pub use crate::db::Database;
