//! Token issue and verification (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult, AuthFailure};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies signed identity tokens.
///
/// Holds the process-wide signing secret and token lifetime; constructed
/// once from [`Config`](crate::config::Config) and injected wherever tokens
/// are produced or checked. Pure given `(subject, ttl, secret, now)` — no
/// I/O beyond the signature itself.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: String, ttl_secs: i64) -> Self {
        Self { secret, ttl_secs }
    }

    /// Issue a token for `subject` using the configured lifetime.
    pub fn issue(&self, subject: Uuid) -> AppResult<String> {
        self.issue_with_ttl(subject, self.ttl_secs)
    }

    /// Issue a token expiring `ttl_secs` from now.
    pub fn issue_with_ttl(&self, subject: Uuid, ttl_secs: i64) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("sign token: {}", e)))?;
        Ok(token)
    }

    /// Verify signature and expiry, returning the token's subject.
    ///
    /// Expiry is strict: no leeway, a token is invalid the second it
    /// expires. The failure cause is internal-only; callers surface every
    /// variant as the same generic rejection.
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthFailure> {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.leeway = 0;
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthFailure::Expired,
            _ => AuthFailure::InvalidSignature,
        })?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| AuthFailure::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-at-least-32-characters!!";

    fn service() -> TokenService {
        TokenService::new(SECRET.to_string(), 7200)
    }

    #[test]
    fn issue_then_verify_yields_subject() {
        let svc = service();
        let subject = Uuid::new_v4();
        let token = svc.issue(subject).unwrap();
        assert_eq!(svc.verify(&token).unwrap(), subject);
    }

    #[test]
    fn claims_carry_configured_ttl() {
        let svc = service();
        let token = svc.issue(Uuid::new_v4()).unwrap();
        // Compare decoded payload fields, not raw token bytes.
        let mut validation = Validation::default();
        validation.validate_exp = false;
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &validation,
        )
        .unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 7200);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let svc = service();
        let other = TokenService::new("a-completely-different-secret-value!".to_string(), 7200);
        let token = other.issue(Uuid::new_v4()).unwrap();
        assert!(matches!(
            svc.verify(&token),
            Err(AuthFailure::InvalidSignature)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = service();
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: (now - Duration::seconds(7300)).timestamp(),
            exp: (now - Duration::seconds(100)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(matches!(svc.verify(&token), Err(AuthFailure::Expired)));
    }

    #[test]
    fn expiry_has_no_grace_window() {
        // One second past exp must already fail; jsonwebtoken's default
        // 60 s leeway would accept this.
        let svc = service();
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: (now - Duration::seconds(10)).timestamp(),
            exp: (now - Duration::seconds(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(matches!(svc.verify(&token), Err(AuthFailure::Expired)));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let svc = service();
        let token = svc.issue(Uuid::new_v4()).unwrap();
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        // Flip one byte of the payload segment without re-signing.
        let mut payload: Vec<u8> = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        parts[1] = String::from_utf8(payload).unwrap();
        let tampered = parts.join(".");
        assert!(svc.verify(&tampered).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let svc = service();
        assert!(matches!(
            svc.verify("not.a.jwt"),
            Err(AuthFailure::InvalidSignature)
        ));
        assert!(svc.verify("").is_err());
    }
}
