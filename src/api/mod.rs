// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

pub mod auth;
pub mod consultations;
pub mod goals;
pub mod health;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/goals", get(goals::list_goals).post(goals::create_goal))
        .route(
            "/goals/{goal_id}",
            get(goals::get_goal)
                .put(goals::update_goal)
                .delete(goals::delete_goal),
        )
        .route(
            "/consultations",
            get(consultations::list_consultations).post(consultations::create_consultation),
        )
        .route(
            "/consultations/{consultation_id}",
            get(consultations::get_consultation)
                .put(consultations::update_consultation)
                .delete(consultations::delete_consultation),
        )
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        auth::me,
        goals::list_goals,
        goals::create_goal,
        goals::get_goal,
        goals::update_goal,
        goals::delete_goal,
        consultations::list_consultations,
        consultations::create_consultation,
        consultations::get_consultation,
        consultations::update_consultation,
        consultations::delete_consultation,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::IdentityResponse,
            auth::AuthResponse,
            goals::CreateGoalRequest,
            goals::UpdateGoalRequest,
            goals::DeleteGoalResponse,
            consultations::CreateConsultationRequest,
            consultations::UpdateConsultationRequest,
            consultations::DeleteConsultationResponse,
            crate::storage::StoredGoal,
            crate::storage::StoredConsultation,
            crate::storage::ConsultationStatus
        )
    ),
    tags(
        (name = "Auth", description = "Registration, login and identity"),
        (name = "Goals", description = "Personal goal management"),
        (name = "Consultations", description = "Consultation booking"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::state::AuthContext;
    use crate::storage::{DocumentStore, StoragePaths};
    use tempfile::TempDir;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let temp = TempDir::new().unwrap();
        let mut storage = DocumentStore::new(StoragePaths::new(temp.path()));
        storage.initialize().unwrap();

        let config = AppConfig::for_tests(temp.path());
        let auth = AuthContext::new(&config).unwrap();
        let state = AppState::new(storage, auth);

        let app = router(state);
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }
}
