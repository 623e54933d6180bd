// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token claims and the authenticated identity attached to requests.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims embedded in a session token.
///
/// The token is a self-contained credential: these three claims plus the
/// signature are all that verification needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the identity id the token was issued for.
    pub sub: String,
    /// Issued-at (Unix seconds).
    pub iat: i64,
    /// Expiry (Unix seconds).
    pub exp: i64,
}

/// Authenticated identity resolved from a verified session token.
///
/// This is the type handlers receive for protected routes. Downstream code
/// trusts the id alone; the full identity record is not re-fetched on every
/// request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Identity id (token `sub` claim).
    pub user_id: String,

    /// Token expiry (Unix timestamp, used for logging, not serialized).
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Create from verified token claims.
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            expires_at: claims.exp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_claims_extracts_identity_id() {
        let claims = Claims {
            sub: "user_123".to_string(),
            iat: 1700000000,
            exp: 1700003600,
        };

        let user = AuthenticatedUser::from_claims(claims);
        assert_eq!(user.user_id, "user_123");
        assert_eq!(user.expires_at, 1700003600);
    }
}
