//! HS256 token issuing and verification.
//!
//! Verification checks, in order: structure, signature, expiry (no leeway)
//! and finally that the token was issued for the use the caller expects.
//! Callers should answer every failure the same way; the variant exists for
//! the logs.

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use tracing::debug;

use storefront_config::JwtConfig;

use crate::claims::{TokenClaims, TokenPurpose, VerifiedSubject};

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token signature does not match")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token was issued for {actual} use, expected {expected}")]
    WrongPurpose {
        expected: TokenPurpose,
        actual: TokenPurpose,
    },

    #[error("token is malformed")]
    Malformed,

    #[error("token lifetime is out of range")]
    ExpiryOutOfRange,

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(&config.secret)
    }

    /// Signs a token for `subject` that expires `ttl` from now.
    pub fn issue(
        &self,
        subject: &str,
        role: &str,
        purpose: TokenPurpose,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(TokenError::ExpiryOutOfRange)?;
        let claims = TokenClaims {
            sub: subject.to_string(),
            role: role.to_string(),
            purpose,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Signing)
    }

    pub fn verify(
        &self,
        token: &str,
        expected: TokenPurpose,
    ) -> Result<VerifiedSubject, TokenError> {
        let claims = decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let err = match e.kind() {
                    JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    JwtErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed,
                };
                debug!(reason = %e, "token rejected");
                err
            })?;

        if claims.purpose != expected {
            return Err(TokenError::WrongPurpose {
                expected,
                actual: claims.purpose,
            });
        }

        Ok(VerifiedSubject {
            subject: claims.sub,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret-key-at-least-32-characters-long")
    }

    #[test]
    fn test_issue_then_verify_returns_subject_and_role() {
        let codec = codec();
        let token = codec
            .issue("user-1", "admin", TokenPurpose::Access, Duration::minutes(30))
            .unwrap();

        let verified = codec.verify(&token, TokenPurpose::Access).unwrap();
        assert_eq!(verified.subject, "user-1");
        assert_eq!(verified.role, "admin");
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let codec = codec();
        let token = codec
            .issue("user-1", "user", TokenPurpose::Refresh, Duration::hours(1))
            .unwrap();

        let err = codec.verify(&token, TokenPurpose::Access).unwrap_err();
        assert!(matches!(
            err,
            TokenError::WrongPurpose {
                expected: TokenPurpose::Access,
                actual: TokenPurpose::Refresh,
            }
        ));
    }

    #[test]
    fn test_expired_token() {
        let codec = codec();
        let token = codec
            .issue("user-1", "user", TokenPurpose::Access, Duration::seconds(-60))
            .unwrap();

        assert!(matches!(
            codec.verify(&token, TokenPurpose::Access),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let result = codec().issue(
            "user-1",
            "user",
            TokenPurpose::Refresh,
            Duration::days(365 * 100_000_000),
        );

        assert!(matches!(result, Err(TokenError::ExpiryOutOfRange)));
    }

    #[test]
    fn test_max_configured_expiry_issues() {
        let token = codec().issue(
            "user-1",
            "user",
            TokenPurpose::Refresh,
            Duration::seconds(storefront_config::jwt::MAX_TOKEN_EXPIRY),
        );

        assert!(token.is_ok());
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let token = codec()
            .issue("user-1", "user", TokenPurpose::Access, Duration::minutes(5))
            .unwrap();

        let other = TokenCodec::new("different-secret-key-at-least-32-characters");
        assert!(matches!(
            other.verify(&token, TokenPurpose::Access),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(
            codec().verify("invalid-token", TokenPurpose::Access),
            Err(TokenError::Malformed)
        ));
        assert!(matches!(
            codec().verify("", TokenPurpose::Access),
            Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn test_refresh_outlives_access() {
        let codec = codec();
        let access = codec
            .issue("u", "user", TokenPurpose::Access, Duration::seconds(1800))
            .unwrap();
        let refresh = codec
            .issue("u", "user", TokenPurpose::Refresh, Duration::seconds(3_600_000))
            .unwrap();

        let exp_of = |token: &str| {
            let mut validation = Validation::new(Algorithm::HS256);
            validation.validate_exp = false;
            decode::<TokenClaims>(
                token,
                &DecodingKey::from_secret(b"test-secret-key-at-least-32-characters-long"),
                &validation,
            )
            .unwrap()
            .claims
            .exp
        };
        assert!(exp_of(&refresh) > exp_of(&access));
    }
}
