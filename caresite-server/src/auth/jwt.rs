//! JWT token service
//!
//! Issues and validates the access/refresh token pair. The scheme is
//! stateless: tokens are never stored or rotated server-side, so issuing a
//! new pair does not invalidate previously issued tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ACCESS_TTL_MINUTES: i64 = 24 * 60;
const REFRESH_TTL_MINUTES: i64 = 30 * 24 * 60;
const ISSUER: &str = "caresite-server";

/// JWT claims stored in both token types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account ID (subject)
    pub sub: String,
    /// Account email
    pub email: String,
    /// Token type: "access" or "refresh"
    pub token_type: String,
    /// Expiration timestamp (seconds)
    pub exp: i64,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

/// Access/refresh token pair returned on signup, login, and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Wrong token type: expected {0}")]
    WrongTokenType(&'static str),

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Create a token service from a signing secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Generate a fresh access/refresh pair for an account
    pub fn generate_pair(&self, account_id: &str, email: &str) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access: self.generate_token(account_id, email, "access", ACCESS_TTL_MINUTES)?,
            refresh: self.generate_token(account_id, email, "refresh", REFRESH_TTL_MINUTES)?,
        })
    }

    fn generate_token(
        &self,
        account_id: &str,
        email: &str,
        token_type: &str,
        ttl_minutes: i64,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            email: email.to_string(),
            token_type: token_type.to_string(),
            exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
            iat: now.timestamp(),
            iss: ISSUER.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate an access token and return its claims
    pub fn validate_access(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate(token)?;
        if claims.token_type != "access" {
            return Err(JwtError::WrongTokenType("access"));
        }
        Ok(claims)
    }

    /// Validate a refresh token and return its claims
    pub fn validate_refresh(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate(token)?;
        if claims.token_type != "refresh" {
            return Err(JwtError::WrongTokenType("refresh"));
        }
        Ok(claims)
    }

    fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                _ => JwtError::InvalidToken(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Extract the bearer token from an Authorization header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

/// Authenticated account context, created by the auth middleware from a
/// validated access token and injected into request extensions.
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub id: String,
    pub email: String,
}

impl From<Claims> for CurrentAccount {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-at-least-32-characters!!")
    }

    #[test]
    fn test_pair_generation_and_validation() {
        let svc = service();
        let pair = svc
            .generate_pair("acc-1", "a@b.com")
            .expect("pair generation should succeed");

        let access = svc
            .validate_access(&pair.access)
            .expect("access token should validate");
        assert_eq!(access.sub, "acc-1");
        assert_eq!(access.email, "a@b.com");
        assert_eq!(access.token_type, "access");

        let refresh = svc
            .validate_refresh(&pair.refresh)
            .expect("refresh token should validate");
        assert_eq!(refresh.sub, "acc-1");
        assert_eq!(refresh.token_type, "refresh");
    }

    #[test]
    fn test_token_type_enforced() {
        let svc = service();
        let pair = svc.generate_pair("acc-1", "a@b.com").unwrap();

        assert!(matches!(
            svc.validate_access(&pair.refresh),
            Err(JwtError::WrongTokenType("access"))
        ));
        assert!(matches!(
            svc.validate_refresh(&pair.access),
            Err(JwtError::WrongTokenType("refresh"))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let pair = service().generate_pair("acc-1", "a@b.com").unwrap();
        let other = JwtService::new("another-secret-also-32-characters!!!");
        assert!(other.validate_access(&pair.access).is_err());
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
