//! API response model for the health endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub users_count: usize,
    pub services_count: usize,
    pub templates_count: usize,
    pub messages_count: usize,
}
