// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated requests.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Extractor gating protected routes on a valid session token.
///
/// Per request: extract the bearer token from the Authorization header,
/// verify it with the token codec, and attach the resolved identity for the
/// handler. Rejection at any step is a 401. The check is side-effect free
/// and does not touch the store; handlers trust the resolved id alone.
///
/// # Example
///
/// ```rust,ignore
/// async fn list_goals(
///     Auth(user): Auth,
///     State(state): State<AppState>,
/// ) -> Result<Json<Vec<StoredGoal>>, ApiError> {
///     // user.user_id contains the authenticated identity's id
/// }
/// ```
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // First check if middleware already set the user
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        // Extract Bearer token
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?
            .trim();

        // Verify and resolve the identity
        let claims = state.auth.tokens.verify(token)?;

        Ok(Auth(AuthenticatedUser::from_claims(claims)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::state::{AppState, AuthContext};
    use crate::storage::{DocumentStore, StoragePaths};
    use axum::http::Request;
    use tempfile::TempDir;

    fn create_test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let paths = StoragePaths::new(temp_dir.path());
        let mut storage = DocumentStore::new(paths);
        storage.initialize().expect("Failed to initialize storage");

        let config = AppConfig::for_tests(temp_dir.path());
        let auth = AuthContext::new(&config).expect("Failed to build auth context");
        (AppState::new(storage, auth), temp_dir)
    }

    fn request_parts(auth_header: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(header) = auth_header {
            builder = builder.header("Authorization", header);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn auth_extractor_requires_auth_header() {
        let (state, _temp_dir) = create_test_state();
        let mut parts = request_parts(None);

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_rejects_non_bearer_header() {
        let (state, _temp_dir) = create_test_state();
        let mut parts = request_parts(Some("Basic dXNlcjpwYXNz".to_string()));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidAuthHeader)));
    }

    #[tokio::test]
    async fn auth_extractor_succeeds_with_issued_token() {
        let (state, _temp_dir) = create_test_state();
        let token = state.auth.tokens.issue("user_123").unwrap();
        let mut parts = request_parts(Some(format!("Bearer {token}")));

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().0.user_id, "user_123");
    }

    #[tokio::test]
    async fn auth_extractor_rejects_tampered_token() {
        let (state, _temp_dir) = create_test_state();
        let token = state.auth.tokens.issue("user_123").unwrap();

        let sig_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[sig_start] = if bytes[sig_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let mut parts = request_parts(Some(format!("Bearer {tampered}")));
        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[tokio::test]
    async fn auth_extractor_prefers_extensions() {
        let (state, _temp_dir) = create_test_state();
        // If middleware already set the user, use that
        let mut parts = request_parts(None);

        let user = AuthenticatedUser {
            user_id: "user_from_middleware".to_string(),
            expires_at: 0,
        };
        parts.extensions.insert(user.clone());

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().0.user_id, "user_from_middleware");
    }
}
