//! Session token handling
//!
//! Authentication itself is delegated to the external identity provider; the
//! gateway only mints and verifies its own short-lived session tokens so the
//! provider is not consulted on every request. The token embeds the signed-in
//! profile (including the locale preference) plus the provider access token
//! needed for sign-out.

use crate::errors::{AppError, Result};
use adelante_catalog::Locale;
use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated user attached to a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// Identity provider user ID
    pub id: Uuid,

    pub email: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,

    /// Preferred interface language
    pub locale: Locale,

    /// Enrollment flags from the provider's user metadata
    pub is_student: bool,
    pub is_alumni: bool,
}

/// JWT claims structure for session tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,

    pub email: String,

    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,

    /// Preferred interface language
    pub locale: Locale,

    #[serde(default)]
    pub is_student: bool,
    #[serde(default)]
    pub is_alumni: bool,

    /// Provider access token, kept so sign-out can revoke it
    pub provider_token: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl SessionClaims {
    /// The profile carried by these claims.
    pub fn user(&self) -> Result<SessionUser> {
        let id = Uuid::parse_str(&self.sub).map_err(|_| AppError::Unauthorized {
            message: "Malformed session subject".to_string(),
        })?;

        Ok(SessionUser {
            id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            locale: self.locale,
            is_student: self.is_student,
            is_alumni: self.is_alumni,
        })
    }
}

/// Session token manager (HS256)
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl JwtManager {
    /// Create a new manager with the given secret
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs: ttl_secs as i64,
        }
    }

    /// Issue a session token for a signed-in user
    pub fn issue(&self, user: &SessionUser, provider_token: &str) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.ttl_secs);

        let claims = SessionClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            locale: user.locale,
            is_student: user.is_student,
            is_alumni: user.is_alumni,
            provider_token: provider_token.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| AppError::Internal {
            message: format!("Failed to issue session token: {}", e),
        })
    }

    /// Validate and decode a session token
    pub fn verify(&self, token: &str) -> Result<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::ExpiredToken,
                _ => AppError::Unauthorized {
                    message: "Invalid session token".to_string(),
                },
            })
    }
}

/// Extract a bearer token from an Authorization header value
pub fn extract_bearer(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Axum extractor for SessionUser
///
/// The gateway's session middleware verifies the token and inserts the user
/// into request extensions; handlers take `SessionUser` as an argument.
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized {
                message: "Missing session".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            email: "ana@example.edu".into(),
            first_name: Some("Ana".into()),
            last_name: Some("Lopez".into()),
            locale: Locale::Es,
            is_student: true,
            is_alumni: false,
        }
    }

    #[test]
    fn test_session_roundtrip() {
        let manager = JwtManager::new("test_secret", 3600);
        let user = sample_user();

        let token = manager.issue(&user, "provider-token-123").unwrap();
        let claims = manager.verify(&token).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.locale, Locale::Es);
        assert_eq!(claims.provider_token, "provider-token-123");

        let restored = claims.user().unwrap();
        assert_eq!(restored.id, user.id);
        assert!(restored.is_student);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let issuer = JwtManager::new("secret-a", 3600);
        let verifier = JwtManager::new("secret-b", 3600);

        let token = issuer.issue(&sample_user(), "t").unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer("abc123"), None);
        assert_eq!(extract_bearer("Basic abc"), None);
    }
}
