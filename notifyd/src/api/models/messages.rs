//! API request/response models for notification dispatch and messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::delivery::MessageStatus;
use crate::store::models::{Channel, Message};
use crate::types::{MessageId, TemplateId};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendEmailRequest {
    #[schema(value_type = Option<uuid::Uuid>)]
    pub template_id: Option<TemplateId>,
    pub recipient_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendSmsRequest {
    #[schema(value_type = Option<uuid::Uuid>)]
    pub template_id: Option<TemplateId>,
    pub recipient_phone: Option<String>,
}

/// Acknowledgement of a dispatched notification. The status is always
/// `pending` here; delivery is simulated later, on status queries.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendResponse {
    pub message: String,
    #[schema(value_type = uuid::Uuid)]
    pub message_id: MessageId,
    pub status: MessageStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageStatusResponse {
    #[schema(value_type = uuid::Uuid)]
    pub message_id: MessageId,
    pub status: MessageStatus,
    #[serde(rename = "type")]
    pub channel: Channel,
    pub recipient: String,
    pub sent_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
}

impl From<Message> for MessageStatusResponse {
    fn from(message: Message) -> Self {
        Self {
            message_id: message.id,
            status: message.status,
            channel: message.channel,
            recipient: message.recipient,
            sent_at: message.sent_at,
            delivered_at: message.delivered_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(value_type = uuid::Uuid)]
    pub id: MessageId,
    #[schema(value_type = uuid::Uuid)]
    pub template_id: TemplateId,
    pub recipient: String,
    #[serde(rename = "type")]
    pub channel: Channel,
    pub status: MessageStatus,
    pub sent_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    /// Content snapshot frozen at send time; subject is email-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub body: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            template_id: message.template_id,
            recipient: message.recipient,
            channel: message.channel,
            status: message.status,
            sent_at: message.sent_at,
            delivered_at: message.delivered_at,
            subject: message.subject,
            body: message.body,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageList {
    pub messages: Vec<MessageResponse>,
}
