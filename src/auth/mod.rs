use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::{SecurityConfig, MAX_JWT_EXPIRY_HOURS};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id in its hyphenated string form
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let hours = expiry_hours.min(MAX_JWT_EXPIRY_HOURS) as i64;
        let exp = (now + Duration::hours(hours)).timestamp();

        Self {
            sub: user_id.hyphenated().to_string(),
            exp,
            iat: now.timestamp(),
        }
    }

    /// Explicit conversion of the subject back into a user id
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|_| AuthError::InvalidSubject)
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token subject is not a user id")]
    InvalidSubject,

    #[error("Password hashing error: {0}")]
    Hashing(String),
}

pub fn generate_jwt(user_id: Uuid, security: &SecurityConfig) -> Result<String, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let claims = Claims::new(user_id, security.jwt_expiry_hours);
    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry, then resolve the subject to a user id
pub fn verify_jwt(token: &str, security: &SecurityConfig) -> Result<Uuid, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default()).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken(e.to_string()),
        }
    })?;

    token_data.claims.user_id()
}

fn hasher(security: &SecurityConfig) -> Result<Argon2<'static>, AuthError> {
    let params = Params::new(
        security.password_hash_memory_kib,
        security.password_hash_iterations,
        1,
        None,
    )
    .map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Argon2id PHC string; the cost parameters travel inside the hash
pub fn hash_password(password: &str, security: &SecurityConfig) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher(security)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

/// Stand-in hash verified when no account matches, so an unknown email
/// costs the same Argon2 pass as a wrong password
pub fn decoy_hash(security: &SecurityConfig) -> Result<String, AuthError> {
    hash_password("campus-kart-decoy-credential", security)
}

pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, Environment};

    fn security() -> SecurityConfig {
        let mut config = AppConfig::for_environment(
            Environment::Development,
            "unit-test-secret".to_string(),
            "memory://".to_string(),
        );
        config.security.password_hash_memory_kib = 64;
        config.security.password_hash_iterations = 1;
        config.security
    }

    #[test]
    fn token_round_trip_yields_user_id() {
        let security = security();
        let user_id = Uuid::new_v4();
        let token = generate_jwt(user_id, &security).unwrap();
        assert_eq!(verify_jwt(&token, &security).unwrap(), user_id);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let security = security();
        let mut other = security.clone();
        other.jwt_secret = "someone-else".to_string();
        let token = generate_jwt(Uuid::new_v4(), &other).unwrap();
        assert!(matches!(verify_jwt(&token, &security), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let security = security();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: (Utc::now() - Duration::hours(2)).timestamp(),
            iat: (Utc::now() - Duration::hours(3)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(security.jwt_secret.as_bytes()),
        )
        .unwrap();
        assert!(matches!(verify_jwt(&token, &security), Err(AuthError::ExpiredToken)));
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        let security = security();
        let claims = Claims {
            sub: "507f1f77bcf86cd799439011".to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iat: Utc::now().timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(security.jwt_secret.as_bytes()),
        )
        .unwrap();
        assert!(matches!(verify_jwt(&token, &security), Err(AuthError::InvalidSubject)));
    }

    #[test]
    fn oversized_expiry_is_capped() {
        let claims = Claims::new(Uuid::new_v4(), u64::MAX);
        let span = claims.exp - claims.iat;
        assert_eq!(span, MAX_JWT_EXPIRY_HOURS as i64 * 3600);
    }

    #[test]
    fn password_hash_verifies_only_the_original() {
        let security = security();
        let hash = hash_password("correct horse", &security).unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }
}
