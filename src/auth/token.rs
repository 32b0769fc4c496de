use crate::config::AuthConfig;
use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a login token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user id.
    pub sub: i64,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Generates an HS256 token for `user_id` that expires after `token_ttl_hours`.
///
/// # Returns
/// `AppError::InternalServerError` if encoding fails.
pub fn generate_token(user_id: i64, config: &AuthConfig) -> Result<String, AppError> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(config.token_ttl_hours))
        .ok_or_else(|| AppError::InternalServerError("Token expiry overflow".into()))?;

    let claims = Claims {
        sub: user_id,
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a token's signature and expiry and returns its claims.
///
/// # Returns
/// `AppError::Unauthorized` if the token is malformed, its signature is invalid, or it has expired.
pub fn verify_token(token: &str, config: &AuthConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_hours: 24,
            bcrypt_cost: 4,
        }
    }

    #[test]
    fn test_token_generation_and_verification() {
        let config = config("test_secret_for_gen_verify");
        let token = generate_token(42, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, 42);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_expiration() {
        let config = config("test_secret_for_expiration");
        let issued = Utc::now() - Duration::hours(3);
        let claims = Claims {
            sub: 2,
            iat: issued.timestamp() as usize,
            exp: (issued + Duration::hours(1)).timestamp() as usize,
        };
        let expired_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        match verify_token(&expired_token, &config) {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("ExpiredSignature")),
            other => panic!("Token should have been rejected as expired: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_token_signature() {
        let token = generate_token(1, &config("one_secret")).unwrap();

        match verify_token(&token, &config("a_completely_different_secret")) {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("InvalidSignature")),
            other => panic!("Token should have been rejected: {:?}", other),
        }
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(
            verify_token("not.a.jwt", &config("secret")),
            Err(AppError::Unauthorized(_))
        ));
    }
}
