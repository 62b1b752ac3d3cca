use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration, OffsetDateTime};

use crate::core::config::Settings;

const ARGON2_MEMORY_KIB: u32 = 19_456;
const ARGON2_TIME: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;

#[derive(Debug, Error)]
pub(crate) enum SecurityError {
    #[error("password hashing failed")]
    Hashing,
    #[error("password verification failed")]
    Verification,
    #[error("jwt encoding failed")]
    JwtEncoding,
    #[error("jwt decoding failed")]
    JwtDecoding,
    #[error("wrong token kind")]
    WrongTokenKind,
    #[error("unsupported jwt algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Distinguishes short-lived access tokens from long-lived refresh tokens,
/// so a refresh token can never authenticate a request and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub(crate) sub: String,
    pub(crate) kind: TokenKind,
    pub(crate) exp: i64,
}

pub(crate) fn hash_password(password: &str) -> Result<String, SecurityError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = argon2_instance(SecurityError::Hashing)?;

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| SecurityError::Hashing)?
        .to_string();

    Ok(hash)
}

pub(crate) fn verify_password(password: &str, hash: &str) -> Result<bool, SecurityError> {
    let parsed = PasswordHash::new(hash).map_err(|_| SecurityError::Verification)?;
    let argon2 = argon2_instance(SecurityError::Verification)?;

    match argon2.verify_password(password.as_bytes(), &parsed) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(_) => Err(SecurityError::Verification),
    }
}

pub(crate) fn create_access_token(
    subject: &str,
    settings: &Settings,
) -> Result<String, SecurityError> {
    let lifetime = Duration::minutes(settings.security().access_token_expire_minutes as i64);
    create_token(subject, TokenKind::Access, lifetime, settings)
}

pub(crate) fn create_refresh_token(
    subject: &str,
    settings: &Settings,
) -> Result<String, SecurityError> {
    let lifetime = Duration::days(settings.security().refresh_token_expire_days as i64);
    create_token(subject, TokenKind::Refresh, lifetime, settings)
}

pub(crate) fn verify_token(
    token: &str,
    kind: TokenKind,
    settings: &Settings,
) -> Result<Claims, SecurityError> {
    let algorithm = algorithm_from_settings(settings)?;
    let mut validation = Validation::new(algorithm);
    validation.validate_exp = true;
    validation.required_spec_claims.insert("exp".to_string());
    validation.required_spec_claims.insert("sub".to_string());

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.security().secret_key.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| SecurityError::JwtDecoding)?;

    if claims.kind != kind {
        return Err(SecurityError::WrongTokenKind);
    }

    Ok(claims)
}

fn create_token(
    subject: &str,
    kind: TokenKind,
    lifetime: Duration,
    settings: &Settings,
) -> Result<String, SecurityError> {
    let algorithm = algorithm_from_settings(settings)?;
    let expire = OffsetDateTime::now_utc() + lifetime;
    let claims = Claims { sub: subject.to_string(), kind, exp: expire.unix_timestamp() };

    encode(
        &jsonwebtoken::Header::new(algorithm),
        &claims,
        &EncodingKey::from_secret(settings.security().secret_key.as_bytes()),
    )
    .map_err(|_| SecurityError::JwtEncoding)
}

fn argon2_instance(error: SecurityError) -> Result<Argon2<'static>, SecurityError> {
    let params = argon2::Params::new(ARGON2_MEMORY_KIB, ARGON2_TIME, ARGON2_PARALLELISM, None)
        .map_err(|_| error)?;
    Ok(Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params))
}

fn algorithm_from_settings(settings: &Settings) -> Result<Algorithm, SecurityError> {
    match settings.security().algorithm.as_str() {
        "HS256" => Ok(Algorithm::HS256),
        other => Err(SecurityError::UnsupportedAlgorithm(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("correct-horse-battery-staple").expect("hash");
        assert!(verify_password("correct-horse-battery-staple", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[tokio::test]
    async fn jwt_encode_decode_roundtrip() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        let settings = Settings::load().expect("settings");

        let token = create_access_token("user-123", &settings).expect("token");
        let claims = verify_token(&token, TokenKind::Access, &settings).expect("claims");

        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[tokio::test]
    async fn access_token_rejected_where_refresh_required() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        let settings = Settings::load().expect("settings");

        let token = create_access_token("user-123", &settings).expect("token");
        let err = verify_token(&token, TokenKind::Refresh, &settings).unwrap_err();
        assert!(matches!(err, SecurityError::WrongTokenKind));
    }

    #[tokio::test]
    async fn refresh_token_rejected_where_access_required() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        let settings = Settings::load().expect("settings");

        let token = create_refresh_token("user-456", &settings).expect("token");
        let err = verify_token(&token, TokenKind::Access, &settings).unwrap_err();
        assert!(matches!(err, SecurityError::WrongTokenKind));
    }
}
