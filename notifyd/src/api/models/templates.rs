//! API request/response models for message templates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::models::Template;
use crate::types::{ServiceId, TemplateId};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TemplateCreate {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    #[schema(value_type = Option<uuid::Uuid>)]
    pub service_id: Option<ServiceId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TemplateResponse {
    #[schema(value_type = uuid::Uuid)]
    pub id: TemplateId,
    pub name: String,
    pub subject: String,
    pub body: String,
    #[schema(value_type = uuid::Uuid)]
    pub service_id: ServiceId,
    pub created_at: DateTime<Utc>,
}

impl From<Template> for TemplateResponse {
    fn from(template: Template) -> Self {
        Self {
            id: template.id,
            name: template.name,
            subject: template.subject,
            body: template.body,
            service_id: template.service_id,
            created_at: template.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TemplateCreated {
    pub message: String,
    pub template: TemplateResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TemplateList {
    pub templates: Vec<TemplateResponse>,
}
