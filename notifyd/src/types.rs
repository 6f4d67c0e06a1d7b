//! Common type definitions.
//!
//! All entity IDs are UUIDs wrapped in type aliases:
//!
//! - [`ServiceId`]: Service identifier
//! - [`TemplateId`]: Message template identifier
//! - [`MessageId`]: Dispatched message identifier
//!
//! Users are keyed by their normalized email address rather than a
//! generated id, so there is no `UserId` alias.

use uuid::Uuid;

// Type aliases for IDs
pub type ServiceId = Uuid;
pub type TemplateId = Uuid;
pub type MessageId = Uuid;
