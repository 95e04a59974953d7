//! Repository layer for account storage operations.
//!
//! Uses runtime queries to avoid sqlx compile-time database connection.

use super::models::Account;
use sqlx::PgPool;
use uuid::Uuid;

/// Account repository for storage operations
pub struct AccountRepository;

impl AccountRepository {
    /// Get account by ID
    pub async fn get_by_id(pool: &PgPool, account_id: Uuid) -> Result<Option<Account>, sqlx::Error> {
        let row = sqlx::query(
            r#"SELECT account_id, username, email, password_hash, roles, created_at
               FROM accounts WHERE account_id = $1"#,
        )
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

        row.map(|r| Self::row_to_account(&r)).transpose()
    }

    /// Get account by username (byte-exact, case-sensitive)
    pub async fn get_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let row = sqlx::query(
            r#"SELECT account_id, username, email, password_hash, roles, created_at
               FROM accounts WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        row.map(|r| Self::row_to_account(&r)).transpose()
    }

    /// Insert a new account, returning its store-assigned ID.
    ///
    /// Uniqueness of username and email is enforced by the store's unique
    /// indexes; a violation surfaces as a database error with
    /// `is_unique_violation() == true`. Callers map that to their own
    /// duplicate-account error. No existence pre-check is performed here.
    pub async fn insert(
        pool: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
        roles: &[String],
    ) -> Result<Uuid, sqlx::Error> {
        use sqlx::Row;
        let row = sqlx::query(
            r#"INSERT INTO accounts (username, email, password_hash, roles)
               VALUES ($1, $2, $3, $4)
               RETURNING account_id"#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(roles)
        .fetch_one(pool)
        .await?;

        row.try_get("account_id")
    }

    /// Replace the stored password hash for one account.
    ///
    /// Single-field UPDATE, atomic with respect to that field. Returns
    /// `false` if no row matched (account deleted since the session began).
    pub async fn update_password_hash(
        pool: &PgPool,
        account_id: Uuid,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"UPDATE accounts SET password_hash = $2 WHERE account_id = $1"#,
        )
        .bind(account_id)
        .bind(password_hash)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Convert a database row to Account.
    fn row_to_account(row: &sqlx::postgres::PgRow) -> Result<Account, sqlx::Error> {
        use crate::db::SafeRow;
        Ok(Account {
            account_id: row
                .try_get_log("account_id")
                .ok_or_else(|| sqlx::Error::ColumnNotFound("account_id".into()))?,
            username: row
                .try_get_log("username")
                .ok_or_else(|| sqlx::Error::ColumnNotFound("username".into()))?,
            email: row
                .try_get_log("email")
                .ok_or_else(|| sqlx::Error::ColumnNotFound("email".into()))?,
            password_hash: row
                .try_get_log("password_hash")
                .ok_or_else(|| sqlx::Error::ColumnNotFound("password_hash".into()))?,
            roles: row
                .try_get_log("roles")
                .ok_or_else(|| sqlx::Error::ColumnNotFound("roles".into()))?,
            created_at: row
                .try_get_log("created_at")
                .ok_or_else(|| sqlx::Error::ColumnNotFound("created_at".into()))?,
        })
    }
}
