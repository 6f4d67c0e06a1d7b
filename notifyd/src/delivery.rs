//! Message delivery status simulation.
//!
//! There is no real transport behind this service. A message starts out
//! `pending` and its status only ever advances lazily, when a caller queries
//! that individual message after the configured delay has elapsed. The new
//! status is drawn from a fixed weighted distribution; `delivered` and
//! `failed` stamp a delivery timestamp and are final. A `pending` draw leaves
//! the message untouched, so the next query rolls again - a message can stay
//! `pending` indefinitely under unlucky draws.
//!
//! `sent` is reachable through the draw but has no outgoing transition, so in
//! practice it is final too.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::models::Message;

/// Delivery status of a dispatched message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Pending,
    Sent,
    Delivered,
    Failed,
}

impl MessageStatus {
    /// Whether the status can still change. Only `pending` ever advances.
    pub fn is_settled(self) -> bool {
        !matches!(self, MessageStatus::Pending)
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageStatus::Pending => write!(f, "pending"),
            MessageStatus::Sent => write!(f, "sent"),
            MessageStatus::Delivered => write!(f, "delivered"),
            MessageStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Outcome weights for the simulated delivery draw, summing to 100.
const STATUS_WEIGHTS: [(MessageStatus, u32); 4] = [
    (MessageStatus::Pending, 10),
    (MessageStatus::Sent, 20),
    (MessageStatus::Delivered, 60),
    (MessageStatus::Failed, 10),
];

/// Draw a simulated delivery outcome from the fixed weights.
pub fn draw_status<R: Rng + ?Sized>(rng: &mut R) -> MessageStatus {
    let dist = WeightedIndex::new(STATUS_WEIGHTS.iter().map(|(_, weight)| *weight))
        .expect("status weights are static and non-zero");
    STATUS_WEIGHTS[dist.sample(rng)].0
}

/// Apply the lazy status transition to a message, if it is due.
///
/// A message is due once it is still `pending` and at least `delay` has
/// elapsed since it was sent. Returns `true` if the status changed. A
/// re-drawn `pending` leaves the message untouched (no timestamp is stamped
/// and the delay gate does not move), so subsequent queries roll again.
pub fn advance_if_due<R: Rng + ?Sized>(
    message: &mut Message,
    delay: Duration,
    now: DateTime<Utc>,
    rng: &mut R,
) -> bool {
    if message.status.is_settled() {
        return false;
    }

    let elapsed = match now.signed_duration_since(message.sent_at).to_std() {
        Ok(elapsed) => elapsed,
        // sent_at in the future, clock skew - treat as not yet due
        Err(_) => return false,
    };
    if elapsed < delay {
        return false;
    }

    let drawn = draw_status(rng);
    if drawn == MessageStatus::Pending {
        return false;
    }

    message.status = drawn;
    if matches!(drawn, MessageStatus::Delivered | MessageStatus::Failed) {
        message.delivered_at = Some(now);
    }
    true
}
