//! Domain records held by the in-memory store.
//!
//! None of these are ever deleted or updated once created, with the single
//! exception of `Message.status`/`Message.delivered_at`, which the lazy
//! delivery simulation mutates in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::delivery::MessageStatus;
use crate::types::{MessageId, ServiceId, TemplateId};

/// A registered account, keyed in the store by normalized email.
#[derive(Debug, Clone)]
pub struct User {
    pub email: String,
    /// Argon2id PHC string. Opaque and one-way; the plaintext is never stored.
    pub password_hash: String,
    /// Sole authorization credential. Immutable after creation.
    pub api_key: String,
    pub created_at: DateTime<Utc>,
}

/// A named sender application belonging to exactly one user.
#[derive(Debug, Clone)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub description: Option<String>,
    /// Owning user's identity. Set at creation, never reassigned.
    pub owner_email: String,
    pub created_at: DateTime<Utc>,
}

/// A reusable message template attached to a service.
///
/// Ownership is transitive through the parent service.
#[derive(Debug, Clone)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub service_id: ServiceId,
    pub created_at: DateTime<Utc>,
}

/// Which transport a message was dispatched over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Email => write!(f, "email"),
            Channel::Sms => write!(f, "sms"),
        }
    }
}

/// A dispatched notification.
///
/// Content is snapshotted from the template at send time, so later template
/// changes can never retroactively rewrite an already-sent message. Email
/// messages carry the subject; SMS messages carry only the body.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub template_id: TemplateId,
    pub recipient: String,
    pub channel: Channel,
    pub status: MessageStatus,
    pub sent_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub subject: Option<String>,
    pub body: String,
}
