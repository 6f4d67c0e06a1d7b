use axum::{extract::State, Json};
use chrono::Utc;

use crate::{api::models::health::HealthResponse, AppState};

/// Service health and table counts
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let counts = state.store.counts();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        users_count: counts.users,
        services_count: counts.services,
        templates_count: counts.templates,
        messages_count: counts.messages,
    })
}
