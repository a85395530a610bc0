//! JWT token generation and validation

use crate::core::error::{RegistryError, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Student record ID
    pub id: String,
    pub roll_no: String,
    pub iat: usize,
    pub exp: usize,
}

/// Generate a signed token for a student, valid for `ttl`
pub fn generate_token(id: &str, roll_no: &str, secret: &str, ttl: chrono::Duration) -> Result<String> {
    let issued_at = chrono::Utc::now();
    let expiration = issued_at
        .checked_add_signed(ttl)
        .ok_or_else(|| RegistryError::CryptoError("Failed to calculate expiration".to_string()))?;

    let claims = Claims {
        id: id.to_string(),
        roll_no: roll_no.to_string(),
        iat: issued_at.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| RegistryError::CryptoError(format!("Failed to generate token: {}", e)))
}

/// Validate a token and extract claims
///
/// Bad signatures, malformed input and expired tokens all yield the same
/// "Invalid token" error; the cause is only logged.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(reason = %e, "Token rejected");
        RegistryError::AuthenticationError("Invalid token".to_string())
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn forge(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip_claims() {
        let token = generate_token("id-1", "R1", SECRET, chrono::Duration::hours(1)).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();

        assert_eq!(claims.id, "id-1");
        assert_eq!(claims.roll_no, "R1");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = generate_token("id-1", "R1", SECRET, chrono::Duration::hours(1)).unwrap();
        let err = validate_token(&token, "other-secret").unwrap_err();
        assert_eq!(err.message(), "Invalid token");
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let token = generate_token("id-1", "R1", SECRET, chrono::Duration::hours(1)).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();
        let forged = forge(
            &Claims {
                roll_no: "R2".into(),
                ..claims
            },
            "attacker",
        );

        // attacker's payload under the genuine signature
        let (payload, _) = forged.rsplit_once('.').unwrap();
        let (_, signature) = token.rsplit_once('.').unwrap();
        let tampered = format!("{}.{}", payload, signature);

        assert!(validate_token(&tampered, SECRET).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            id: "id-1".into(),
            roll_no: "R1".into(),
            iat: now - 3601,
            exp: now - 1,
        };

        let err = validate_token(&forge(&claims, SECRET), SECRET).unwrap_err();
        assert!(matches!(err, RegistryError::AuthenticationError(_)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(validate_token("not-a-token", SECRET).is_err());
        assert!(validate_token("", SECRET).is_err());
    }
}
