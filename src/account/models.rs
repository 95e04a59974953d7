//! Data models for account storage

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered account.
///
/// `password_hash` is a PHC-encoded argon2 string with the salt embedded.
/// This type is never serialized into a response; claims and display info
/// are copied out field by field where needed.
#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    /// Granted roles. Non-empty, enforced at registration and by a store
    /// CHECK constraint.
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_debug_does_not_panic() {
        let account = Account {
            account_id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            roles: vec!["nurse".to_string()],
            created_at: Utc::now(),
        };
        let _ = format!("{:?}", account);
    }
}
