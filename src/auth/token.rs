// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token codec.
//!
//! Tokens are HS256 JWTs carrying the identity id and a validity window.
//! They are stateless: verification needs only the process-wide signing
//! secret, no store or network round-trip, so any bit-level modification or
//! an elapsed expiry makes a token unconditionally invalid. There is no
//! revocation before natural expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{AuthError, Claims};

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Issues and verifies signed, time-bounded session tokens.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from the signing secret and validity window.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issue a token for an identity id, valid for the configured window.
    pub fn issue(&self, identity_id: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::InternalError(e.to_string()))
    }

    /// Verify a token and return its embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;

        let token_data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(b"test-secret-key-that-is-long-enough", Duration::days(7))
    }

    #[test]
    fn issue_then_verify_yields_same_identity() {
        let codec = codec();
        let token = codec.issue("user-123").unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expiry_matches_configured_window() {
        let codec = codec();
        let token = codec.issue("user-123").unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, Duration::days(7).num_seconds());
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let codec = codec();
        let token = codec.issue("user-123").unwrap();

        // Flip the first character of the signature segment
        let sig_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[sig_start] = if bytes[sig_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let result = codec.verify(&tampered);
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let codec = codec();
        let other = TokenCodec::new(b"a-completely-different-secret", Duration::days(7));

        let token = codec.issue("user-123").unwrap();
        let result = other.verify(&token);
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Negative TTL puts the expiry well past the clock skew leeway
        let stale = TokenCodec::new(b"test-secret-key-that-is-long-enough", Duration::hours(-2));
        let token = stale.issue("user-123").unwrap();

        let result = codec().verify(&token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn garbage_is_malformed() {
        let result = codec().verify("not-a-valid-token");
        assert!(matches!(result, Err(AuthError::MalformedToken)));
    }

    #[test]
    fn different_identities_get_distinct_tokens() {
        let codec = codec();
        let alice = codec.issue("alice").unwrap();
        let bob = codec.issue("bob").unwrap();

        assert_ne!(alice, bob);
        assert_eq!(codec.verify(&alice).unwrap().sub, "alice");
        assert_eq!(codec.verify(&bob).unwrap().sub, "bob");
    }
}
