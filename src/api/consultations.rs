// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Consultation endpoints.
//!
//! Booking and managing dietician consultations. Ownership is enforced
//! exactly as for goals: owner-scoped listing, owner forced at creation,
//! owner verified on read/update/delete.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    audit_log,
    auth::{Auth, AuthenticatedUser},
    error::ApiError,
    state::AppState,
    storage::{
        AuditEventType, ConsultationRepository, ConsultationStatus, DocumentStore, OwnershipCheck,
        StorageError, StoredConsultation,
    },
};

/// Request to book a consultation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateConsultationRequest {
    /// Desired day.
    pub date: NaiveDate,
    /// Desired slot, free-form ("10:30", "morning").
    pub time: String,
    /// Optional notes for the dietician.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Patch for consultation updates.
///
/// Absent fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateConsultationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ConsultationStatus>,
}

/// Response after cancelling a consultation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteConsultationResponse {
    /// Message indicating success.
    pub message: String,
    /// The ID of the removed consultation.
    pub consultation_id: String,
}

/// Load a consultation and verify the caller owns it, auditing denials.
fn load_owned_consultation(
    storage: &DocumentStore,
    user: &AuthenticatedUser,
    consultation_id: &str,
) -> Result<StoredConsultation, ApiError> {
    match ConsultationRepository::new(storage)
        .get(consultation_id)
        .verify_owner(user)
    {
        Ok(consultation) => Ok(consultation),
        Err(e @ StorageError::PermissionDenied { .. }) => {
            audit_log!(
                storage,
                AuditEventType::OwnershipDenied,
                user,
                "consultation",
                consultation_id
            );
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// List the authenticated user's consultations, most recent date first.
#[utoipa::path(
    get,
    path = "/api/consultations",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of consultations", body = [StoredConsultation]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_consultations(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredConsultation>>, ApiError> {
    let storage = state.storage();
    let consultations = ConsultationRepository::new(&storage).list_by_owner(&user.user_id)?;
    Ok(Json(consultations))
}

/// Book a consultation for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/consultations",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    request_body = CreateConsultationRequest,
    responses(
        (status = 201, description = "Consultation booked", body = StoredConsultation),
        (status = 400, description = "Missing time slot"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_consultation(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateConsultationRequest>,
) -> Result<(StatusCode, Json<StoredConsultation>), ApiError> {
    let time = request.time.trim().to_string();
    if time.is_empty() {
        return Err(ApiError::bad_request("Please provide a time slot"));
    }

    // Owner reference comes from the verified token, never the body
    let consultation = StoredConsultation {
        id: uuid::Uuid::new_v4().to_string(),
        owner_id: user.user_id.clone(),
        date: request.date,
        time,
        notes: request.notes,
        status: ConsultationStatus::default(),
        created_at: Utc::now(),
    };

    let storage = state.storage();
    ConsultationRepository::new(&storage).create(&consultation)?;

    audit_log!(
        &storage,
        AuditEventType::ConsultationBooked,
        &user,
        "consultation",
        &consultation.id
    );

    Ok((StatusCode::CREATED, Json(consultation)))
}

/// Get a specific consultation. Only returns consultations owned by the
/// authenticated user.
#[utoipa::path(
    get,
    path = "/api/consultations/{consultation_id}",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(
        ("consultation_id" = String, Path, description = "Consultation ID")
    ),
    responses(
        (status = 200, description = "Consultation details", body = StoredConsultation),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not your consultation"),
        (status = 404, description = "Consultation not found")
    )
)]
pub async fn get_consultation(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(consultation_id): Path<String>,
) -> Result<Json<StoredConsultation>, ApiError> {
    let storage = state.storage();
    let consultation = load_owned_consultation(&storage, &user, &consultation_id)?;
    Ok(Json(consultation))
}

/// Update a consultation's status.
#[utoipa::path(
    put,
    path = "/api/consultations/{consultation_id}",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(
        ("consultation_id" = String, Path, description = "Consultation ID")
    ),
    request_body = UpdateConsultationRequest,
    responses(
        (status = 200, description = "Consultation updated", body = StoredConsultation),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not your consultation"),
        (status = 404, description = "Consultation not found")
    )
)]
pub async fn update_consultation(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(consultation_id): Path<String>,
    Json(request): Json<UpdateConsultationRequest>,
) -> Result<Json<StoredConsultation>, ApiError> {
    let storage = state.storage();
    let mut consultation = load_owned_consultation(&storage, &user, &consultation_id)?;

    if let Some(status) = request.status {
        consultation.status = status;
    }

    ConsultationRepository::new(&storage).update(&consultation)?;

    audit_log!(
        &storage,
        AuditEventType::ConsultationUpdated,
        &user,
        "consultation",
        &consultation.id
    );

    Ok(Json(consultation))
}

/// Cancel and remove a consultation.
#[utoipa::path(
    delete,
    path = "/api/consultations/{consultation_id}",
    tag = "Consultations",
    security(("bearer_auth" = [])),
    params(
        ("consultation_id" = String, Path, description = "Consultation ID to remove")
    ),
    responses(
        (status = 200, description = "Consultation removed", body = DeleteConsultationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not your consultation"),
        (status = 404, description = "Consultation not found")
    )
)]
pub async fn delete_consultation(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(consultation_id): Path<String>,
) -> Result<Json<DeleteConsultationResponse>, ApiError> {
    let storage = state.storage();
    let consultation = load_owned_consultation(&storage, &user, &consultation_id)?;

    ConsultationRepository::new(&storage).delete(&consultation.id)?;

    audit_log!(
        &storage,
        AuditEventType::ConsultationCancelled,
        &user,
        "consultation",
        &consultation.id
    );

    Ok(Json(DeleteConsultationResponse {
        message: "Consultation removed".to_string(),
        consultation_id: consultation.id,
    }))
}
