use axum::{extract::State, http::StatusCode, Json};

use crate::{
    api::models::services::{ServiceCreate, ServiceCreated, ServiceList, ServiceResponse},
    auth::CurrentUser,
    errors::{Error, Result},
    AppState,
};

/// Create a service owned by the authenticated user
#[utoipa::path(
    post,
    path = "/api/services",
    request_body = ServiceCreate,
    tag = "services",
    responses(
        (status = 201, description = "Service created successfully", body = ServiceCreated),
        (status = 400, description = "Missing service name"),
        (status = 401, description = "Missing or invalid API key"),
    )
)]
#[tracing::instrument(skip_all, fields(user = %user.email))]
pub async fn create_service(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<ServiceCreate>,
) -> Result<(StatusCode, Json<ServiceCreated>)> {
    let name = request.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(Error::BadRequest {
            message: "Service name is required".to_string(),
        });
    }

    let service = state
        .store
        .create_service(&user.email, name.to_string(), request.description);
    tracing::info!(service_id = %service.id, "service created");

    Ok((
        StatusCode::CREATED,
        Json(ServiceCreated {
            message: "Service created successfully".to_string(),
            service: service.into(),
        }),
    ))
}

/// List all services owned by the authenticated user
#[utoipa::path(
    get,
    path = "/api/services",
    tag = "services",
    responses(
        (status = 200, description = "Caller's services", body = ServiceList),
        (status = 401, description = "Missing or invalid API key"),
    )
)]
#[tracing::instrument(skip_all, fields(user = %user.email))]
pub async fn list_services(State(state): State<AppState>, user: CurrentUser) -> Result<Json<ServiceList>> {
    let services = state
        .store
        .services_owned(&user.email)
        .into_iter()
        .map(ServiceResponse::from)
        .collect();

    Ok(Json(ServiceList { services }))
}
