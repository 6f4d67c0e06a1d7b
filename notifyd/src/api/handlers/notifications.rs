use axum::{extract::State, Json};

use crate::{
    api::models::messages::{SendEmailRequest, SendResponse, SendSmsRequest},
    auth::CurrentUser,
    errors::{Error, Result},
    store::models::Channel,
    AppState,
};

/// Dispatch an email notification rendered from a template
#[utoipa::path(
    post,
    path = "/api/notifications/email",
    request_body = SendEmailRequest,
    tag = "notifications",
    responses(
        (status = 200, description = "Email notification dispatched", body = SendResponse),
        (status = 400, description = "Missing fields or invalid recipient"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 403, description = "Template belongs to a different user"),
        (status = 404, description = "Template not found"),
    )
)]
#[tracing::instrument(skip_all, fields(user = %user.email))]
pub async fn send_email(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<SendEmailRequest>,
) -> Result<Json<SendResponse>> {
    let (Some(template_id), Some(recipient)) = (request.template_id, request.recipient_email) else {
        return Err(Error::BadRequest {
            message: "Template ID and recipient email are required".to_string(),
        });
    };

    // Resolve and authorize the template before validating the recipient, so
    // an unknown or foreign template reports 404/403 rather than 400.
    let template = state.store.template_for_send(&user.email, template_id)?;

    // Same minimal check as signup, deliberately weak
    if !recipient.contains('@') || !recipient.contains('.') {
        return Err(Error::BadRequest {
            message: "Invalid recipient email format".to_string(),
        });
    }

    let message = state.store.create_message(&template, recipient, Channel::Email);
    tracing::info!(message_id = %message.id, recipient = %message.recipient, "email notification dispatched");

    Ok(Json(SendResponse {
        message: "Email notification sent successfully".to_string(),
        message_id: message.id,
        status: message.status,
    }))
}

/// Dispatch an SMS notification rendered from a template
#[utoipa::path(
    post,
    path = "/api/notifications/sms",
    request_body = SendSmsRequest,
    tag = "notifications",
    responses(
        (status = 200, description = "SMS notification dispatched", body = SendResponse),
        (status = 400, description = "Missing fields or invalid recipient"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 403, description = "Template belongs to a different user"),
        (status = 404, description = "Template not found"),
    )
)]
#[tracing::instrument(skip_all, fields(user = %user.email))]
pub async fn send_sms(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<SendSmsRequest>,
) -> Result<Json<SendResponse>> {
    let (Some(template_id), Some(recipient)) = (request.template_id, request.recipient_phone) else {
        return Err(Error::BadRequest {
            message: "Template ID and recipient phone are required".to_string(),
        });
    };

    let template = state.store.template_for_send(&user.email, template_id)?;

    // At least 10 digits once formatting characters are stripped
    let digits = recipient.chars().filter(char::is_ascii_digit).count();
    if digits < 10 {
        return Err(Error::BadRequest {
            message: "Invalid phone number format".to_string(),
        });
    }

    let message = state.store.create_message(&template, recipient, Channel::Sms);
    tracing::info!(message_id = %message.id, recipient = %message.recipient, "sms notification dispatched");

    Ok(Json(SendResponse {
        message: "SMS notification sent successfully".to_string(),
        message_id: message.id,
        status: message.status,
    }))
}
