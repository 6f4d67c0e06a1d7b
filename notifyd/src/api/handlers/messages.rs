use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::models::messages::{MessageList, MessageResponse, MessageStatusResponse},
    auth::CurrentUser,
    errors::Result,
    types::MessageId,
    AppState,
};

/// Get the current delivery status of a single message
///
/// This is the only endpoint that advances the simulated delivery: if the
/// message is still pending and past the delivery delay, a new status is
/// drawn as part of answering the query.
#[utoipa::path(
    get,
    path = "/api/messages/{id}/status",
    params(("id" = uuid::Uuid, Path, description = "Message id")),
    tag = "messages",
    responses(
        (status = 200, description = "Current message status", body = MessageStatusResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 403, description = "Message belongs to a different user"),
        (status = 404, description = "Message not found"),
    )
)]
#[tracing::instrument(skip_all, fields(user = %user.email, message_id = %id))]
pub async fn get_message_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<MessageId>,
) -> Result<Json<MessageStatusResponse>> {
    let message = state.store.message_status(&user.email, id)?;
    Ok(Json(message.into()))
}

/// List all messages dispatched through the caller's services
///
/// Listing never advances delivery simulation; statuses reflect whatever the
/// last individual status query materialized.
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "messages",
    responses(
        (status = 200, description = "Caller's messages", body = MessageList),
        (status = 401, description = "Missing or invalid API key"),
    )
)]
#[tracing::instrument(skip_all, fields(user = %user.email))]
pub async fn list_messages(State(state): State<AppState>, user: CurrentUser) -> Result<Json<MessageList>> {
    let messages = state
        .store
        .messages_owned(&user.email)
        .into_iter()
        .map(MessageResponse::from)
        .collect();

    Ok(Json(MessageList { messages }))
}
