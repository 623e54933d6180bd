// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Goal endpoints.
//!
//! All operations require authentication and enforce ownership: the list is
//! owner-scoped, the owner reference is forced from the authenticated
//! identity at creation, and read/update/delete verify the stored owner.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    audit_log,
    auth::{Auth, AuthenticatedUser},
    error::ApiError,
    state::AppState,
    storage::{
        AuditEventType, DocumentStore, GoalRepository, OwnershipCheck, StorageError, StoredGoal,
    },
};

/// Request to create a new goal.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateGoalRequest {
    /// What the user wants to achieve.
    pub description: String,
}

/// Patch for goal updates.
///
/// Absent fields keep their stored values; present fields are applied even
/// when falsy (`""`, `false`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateGoalRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Response after deleting a goal.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteGoalResponse {
    /// Message indicating success.
    pub message: String,
    /// The ID of the deleted goal.
    pub goal_id: String,
}

/// Load a goal and verify the caller owns it, auditing denials.
fn load_owned_goal(
    storage: &DocumentStore,
    user: &AuthenticatedUser,
    goal_id: &str,
) -> Result<StoredGoal, ApiError> {
    match GoalRepository::new(storage).get(goal_id).verify_owner(user) {
        Ok(goal) => Ok(goal),
        Err(e @ StorageError::PermissionDenied { .. }) => {
            audit_log!(storage, AuditEventType::OwnershipDenied, user, "goal", goal_id);
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// List the authenticated user's goals, newest first.
#[utoipa::path(
    get,
    path = "/api/goals",
    tag = "Goals",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of goals", body = [StoredGoal]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_goals(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredGoal>>, ApiError> {
    let storage = state.storage();
    let goals = GoalRepository::new(&storage).list_by_owner(&user.user_id)?;
    Ok(Json(goals))
}

/// Create a goal owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/api/goals",
    tag = "Goals",
    security(("bearer_auth" = [])),
    request_body = CreateGoalRequest,
    responses(
        (status = 201, description = "Goal created", body = StoredGoal),
        (status = 400, description = "Missing description"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_goal(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<StoredGoal>), ApiError> {
    let description = request.description.trim().to_string();
    if description.is_empty() {
        return Err(ApiError::bad_request("Please provide a description"));
    }

    // Owner reference comes from the verified token, never the body
    let goal = StoredGoal {
        id: uuid::Uuid::new_v4().to_string(),
        owner_id: user.user_id.clone(),
        description,
        completed: false,
        created_at: Utc::now(),
    };

    let storage = state.storage();
    GoalRepository::new(&storage).create(&goal)?;

    audit_log!(&storage, AuditEventType::GoalCreated, &user, "goal", &goal.id);

    Ok((StatusCode::CREATED, Json(goal)))
}

/// Get a specific goal. Only returns goals owned by the authenticated user.
#[utoipa::path(
    get,
    path = "/api/goals/{goal_id}",
    tag = "Goals",
    security(("bearer_auth" = [])),
    params(
        ("goal_id" = String, Path, description = "Goal ID")
    ),
    responses(
        (status = 200, description = "Goal details", body = StoredGoal),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not your goal"),
        (status = 404, description = "Goal not found")
    )
)]
pub async fn get_goal(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(goal_id): Path<String>,
) -> Result<Json<StoredGoal>, ApiError> {
    let storage = state.storage();
    let goal = load_owned_goal(&storage, &user, &goal_id)?;
    Ok(Json(goal))
}

/// Update a goal with explicit patch semantics.
#[utoipa::path(
    put,
    path = "/api/goals/{goal_id}",
    tag = "Goals",
    security(("bearer_auth" = [])),
    params(
        ("goal_id" = String, Path, description = "Goal ID")
    ),
    request_body = UpdateGoalRequest,
    responses(
        (status = 200, description = "Goal updated", body = StoredGoal),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not your goal"),
        (status = 404, description = "Goal not found")
    )
)]
pub async fn update_goal(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(goal_id): Path<String>,
    Json(request): Json<UpdateGoalRequest>,
) -> Result<Json<StoredGoal>, ApiError> {
    let storage = state.storage();
    let mut goal = load_owned_goal(&storage, &user, &goal_id)?;

    if let Some(description) = request.description {
        goal.description = description;
    }
    if let Some(completed) = request.completed {
        goal.completed = completed;
    }

    GoalRepository::new(&storage).update(&goal)?;

    audit_log!(&storage, AuditEventType::GoalUpdated, &user, "goal", &goal.id);

    Ok(Json(goal))
}

/// Delete a goal.
#[utoipa::path(
    delete,
    path = "/api/goals/{goal_id}",
    tag = "Goals",
    security(("bearer_auth" = [])),
    params(
        ("goal_id" = String, Path, description = "Goal ID to delete")
    ),
    responses(
        (status = 200, description = "Goal deleted", body = DeleteGoalResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not your goal"),
        (status = 404, description = "Goal not found")
    )
)]
pub async fn delete_goal(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(goal_id): Path<String>,
) -> Result<Json<DeleteGoalResponse>, ApiError> {
    let storage = state.storage();
    let goal = load_owned_goal(&storage, &user, &goal_id)?;

    GoalRepository::new(&storage).delete(&goal.id)?;

    audit_log!(&storage, AuditEventType::GoalDeleted, &user, "goal", &goal.id);

    Ok(Json(DeleteGoalResponse {
        message: "Goal removed".to_string(),
        goal_id: goal.id,
    }))
}
