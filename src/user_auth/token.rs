//! Signed session tokens.
//!
//! HS256 bearer tokens with a fixed TTL. Verification is pure: no store
//! round-trip, no locking. There is no revocation path; a token stays valid
//! until its embedded expiry regardless of later password changes.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::TokenError;

/// Session claims carried inside a bearer token.
///
/// Reconstructed fresh on every verification; never persisted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Account ID as string
    pub sub: String,
    pub username: String,
    pub roles: Vec<String>,
    /// Issued at (UTC timestamp)
    pub iat: usize,
    /// Expiration time (UTC timestamp)
    pub exp: usize,
}

/// Signs claims into opaque bearer tokens and verifies them back.
///
/// The secret is injected at construction and held for process lifetime.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    /// Issue a token for the given identity with `exp = now + ttl`.
    pub fn issue(
        &self,
        account_id: Uuid,
        username: &str,
        roles: Vec<String>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .expect("valid timestamp");

        let claims = Claims {
            sub: account_id.to_string(),
            username: username.to_string(),
            roles,
            iat: now.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Verify a token's signature and expiry and recover its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // No leeway: the expiry boundary is exact
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => Err(match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_codec() -> TokenCodec {
        TokenCodec::new("test-secret", 7200)
    }

    #[test]
    fn test_issue_verify_round_trip() {
        let codec = test_codec();
        let account_id = Uuid::new_v4();
        let roles = vec!["nurse".to_string(), "clerk".to_string()];

        let token = codec.issue(account_id, "alice", roles.clone()).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.roles, roles);
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 7200);
    }

    #[test]
    fn test_expired_token_rejected() {
        let codec = test_codec();
        // Hand-craft a token whose expiry is already in the past, signed
        // with the same secret.
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            username: "alice".to_string(),
            roles: vec!["nurse".to_string()],
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(codec.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let codec = test_codec();
        let other = TokenCodec::new("different-secret", 7200);

        let token = other
            .issue(Uuid::new_v4(), "alice", vec!["nurse".to_string()])
            .unwrap();

        assert!(matches!(
            codec.verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let codec = test_codec();
        assert!(matches!(
            codec.verify("not-a-token"),
            Err(TokenError::Malformed)
        ));
        assert!(matches!(codec.verify(""), Err(TokenError::Malformed)));
    }
}
