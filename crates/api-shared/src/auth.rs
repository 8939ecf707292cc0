//! Password hashing and access tokens.
//!
//! Passwords are hashed with argon2id and stored as PHC strings. Access
//! tokens are HS256 JWTs carrying the account id and its roles; the signing
//! secret and token lifetime come from startup configuration, never from
//! process-wide environment reads at request time.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("failed to hash password")]
    PasswordHashing,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("failed to create access token")]
    TokenCreation,
    #[error("invalid or expired access token")]
    InvalidToken,
}

/// Hashes a plaintext password into an argon2id PHC string.
///
/// # Errors
///
/// Returns `AuthError::PasswordHashing` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!("password hashing failed: {e}");
            AuthError::PasswordHashing
        })
}

/// Verifies a plaintext password against a stored PHC string.
///
/// An unparsable stored hash verifies as false; the caller cannot tell it
/// apart from a wrong password, which is the intended behaviour for a login
/// path.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("stored password hash is unparsable");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Claims carried by a CardioScan access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id (canonical 32-hex form).
    pub sub: String,
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl_hours: i64,
}

impl TokenService {
    pub fn new(secret: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_hours,
        }
    }

    /// Issues a token for `user_id` carrying `roles`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenCreation` if encoding fails.
    pub fn issue(&self, user_id: &str, roles: &[String]) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_owned(),
            roles: roles.to_vec(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.ttl_hours)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!("token encoding failed: {e}");
            AuthError::TokenCreation
        })
    }

    /// Verifies a token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` for anything that does not verify:
    /// bad signature, expired, malformed.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trips_and_rejects_wrong_input() {
        let hash = hash_password("hunter2!").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2!", &hash));
        assert!(!verify_password("hunter3!", &hash));
    }

    #[test]
    fn unparsable_stored_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn token_round_trips_claims() {
        let tokens = TokenService::new("unit-test-secret", 12);
        let roles = vec!["clinician".to_owned()];
        let token = tokens
            .issue("550e8400e29b41d4a716446655440000", &roles)
            .unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "550e8400e29b41d4a716446655440000");
        assert_eq!(claims.roles, roles);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = TokenService::new("secret-a", 12);
        let verifier = TokenService::new("secret-b", 12);
        let token = issuer.issue("user", &[]).unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let secret = "unit-test-secret";
        let now = Utc::now();
        let stale = Claims {
            sub: "user".into(),
            roles: vec![],
            iat: (now - Duration::hours(3)).timestamp(),
            exp: (now - Duration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        let tokens = TokenService::new(secret, 12);
        assert!(matches!(tokens.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let tokens = TokenService::new("unit-test-secret", 12);
        assert!(matches!(
            tokens.verify("definitely.not.ajwt"),
            Err(AuthError::InvalidToken)
        ));
    }
}
