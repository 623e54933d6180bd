// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login endpoints.
//!
//! Both success paths return the identity (without its hash) and a freshly
//! issued session token. Login failure is deliberately non-specific: unknown
//! email and wrong password produce the same message and status, and the
//! unknown-email path burns comparable hashing work.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    auth::{password, Auth},
    config::MIN_PASSWORD_LEN,
    error::ApiError,
    state::AppState,
    storage::{
        AuditEvent, AuditEventType, AuditRepository, IdentityRepository, StorageError,
        StoredIdentity,
    },
};

/// Message returned for any credential failure at login.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Request to register a new identity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Login email (case-insensitive).
    pub email: String,
    /// Plaintext secret, hashed before storage.
    pub password: String,
}

/// Request to log in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Identity as exposed to clients. Never carries the secret hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdentityResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<StoredIdentity> for IdentityResponse {
    fn from(identity: StoredIdentity) -> Self {
        Self {
            id: identity.id,
            name: identity.name,
            email: identity.email,
            created_at: identity.created_at,
        }
    }
}

/// Response for successful registration or login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// The authenticated identity.
    pub user: IdentityResponse,
    /// Freshly issued session token.
    pub token: String,
}

/// Register a new identity.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Identity created", body = AuthResponse),
        (status = 400, description = "Missing field or password too short"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let name = request.name.trim();
    let email = request.email.trim().to_ascii_lowercase();

    if name.is_empty() || email.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request(
            "Please provide name, email and password",
        ));
    }

    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let password_hash = password::hash_password(&request.password).map_err(ApiError::internal)?;

    let identity = StoredIdentity {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        email,
        password_hash,
        created_at: Utc::now(),
    };

    let storage = state.storage();
    let repo = IdentityRepository::new(&storage);

    match repo.create(&identity) {
        Ok(()) => {}
        Err(StorageError::AlreadyExists(_)) => {
            return Err(ApiError::conflict(
                "An account with this email already exists",
            ));
        }
        Err(e) => return Err(e.into()),
    }

    let token = state
        .auth
        .tokens
        .issue(&identity.id)
        .map_err(ApiError::internal)?;

    let _ = AuditRepository::new(&storage)
        .log(&AuditEvent::new(AuditEventType::IdentityRegistered).with_user(&identity.id));

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: identity.into(),
            token,
        }),
    ))
}

/// Log in with email and password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = AuthResponse),
        (status = 400, description = "Missing field"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = request.email.trim().to_ascii_lowercase();

    if email.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request("Please provide email and password"));
    }

    let storage = state.storage();
    let repo = IdentityRepository::new(&storage);
    let audit = AuditRepository::new(&storage);

    let Some(identity) = repo.find_by_email(&email)? else {
        // Burn comparable hashing work so the response time does not reveal
        // whether the email exists
        let _ = password::verify_password(&state.auth.fallback_hash, &request.password);
        let _ = audit.log(
            &AuditEvent::new(AuditEventType::LoginFailed)
                .with_details(serde_json::json!({ "email": email }))
                .failed(INVALID_CREDENTIALS),
        );
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    if !password::verify_password(&identity.password_hash, &request.password) {
        let _ = audit.log(
            &AuditEvent::new(AuditEventType::LoginFailed)
                .with_user(&identity.id)
                .failed(INVALID_CREDENTIALS),
        );
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = state
        .auth
        .tokens
        .issue(&identity.id)
        .map_err(ApiError::internal)?;

    let _ = audit.log(&AuditEvent::new(AuditEventType::LoginSucceeded).with_user(&identity.id));

    Ok(Json(AuthResponse {
        user: identity.into(),
        token,
    }))
}

/// Get the current authenticated identity.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Identity information", body = IdentityResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "Identity record no longer exists")
    )
)]
pub async fn me(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<IdentityResponse>, ApiError> {
    let storage = state.storage();
    let identity = IdentityRepository::new(&storage).get(&user.user_id)?;
    Ok(Json(identity.into()))
}
