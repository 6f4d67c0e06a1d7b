use axum::{extract::State, http::StatusCode, Json};

use crate::{
    api::models::templates::{TemplateCreate, TemplateCreated, TemplateList, TemplateResponse},
    auth::CurrentUser,
    errors::{Error, Result},
    AppState,
};

/// Create a template attached to one of the caller's services
#[utoipa::path(
    post,
    path = "/api/templates",
    request_body = TemplateCreate,
    tag = "templates",
    responses(
        (status = 201, description = "Template created successfully", body = TemplateCreated),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 403, description = "Service belongs to a different user"),
        (status = 404, description = "Service not found"),
    )
)]
#[tracing::instrument(skip_all, fields(user = %user.email))]
pub async fn create_template(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<TemplateCreate>,
) -> Result<(StatusCode, Json<TemplateCreated>)> {
    let name = request.name.as_deref().map(str::trim).unwrap_or_default();
    let subject = request.subject.as_deref().unwrap_or_default();
    let body = request.body.as_deref().unwrap_or_default();
    let service_id = match request.service_id {
        Some(id) if !name.is_empty() && !subject.is_empty() && !body.is_empty() => id,
        _ => {
            return Err(Error::BadRequest {
                message: "Name, subject, body, and service_id are required".to_string(),
            })
        }
    };

    let template = state.store.create_template(
        &user.email,
        service_id,
        name.to_string(),
        subject.to_string(),
        body.to_string(),
    )?;
    tracing::info!(template_id = %template.id, service_id = %service_id, "template created");

    Ok((
        StatusCode::CREATED,
        Json(TemplateCreated {
            message: "Template created successfully".to_string(),
            template: template.into(),
        }),
    ))
}

/// List all templates belonging to the caller's services
#[utoipa::path(
    get,
    path = "/api/templates",
    tag = "templates",
    responses(
        (status = 200, description = "Caller's templates", body = TemplateList),
        (status = 401, description = "Missing or invalid API key"),
    )
)]
#[tracing::instrument(skip_all, fields(user = %user.email))]
pub async fn list_templates(State(state): State<AppState>, user: CurrentUser) -> Result<Json<TemplateList>> {
    let templates = state
        .store
        .templates_owned(&user.email)
        .into_iter()
        .map(TemplateResponse::from)
        .collect();

    Ok(Json(TemplateList { templates }))
}
