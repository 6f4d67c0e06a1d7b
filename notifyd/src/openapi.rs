//! OpenAPI documentation for the notification API.
//!
//! Served by Scalar at `/docs`, with the raw document at
//! `/api-docs/openapi.json`.

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::{api, auth::API_KEY_HEADER, delivery::MessageStatus, store::models::Channel};

/// Registers the `X-API-Key` header scheme so the docs UI offers an auth input.
struct ApiKeyAddon;

impl Modify for ApiKeyAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "ApiKeyAuth",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "notifyd",
        description = "Multi-tenant notification dispatch API. Register to obtain an API key, \
                       create services and templates, then dispatch email and SMS notifications \
                       whose delivery is simulated.",
    ),
    modifiers(&ApiKeyAddon),
    paths(
        api::handlers::auth::signup,
        api::handlers::services::create_service,
        api::handlers::services::list_services,
        api::handlers::templates::create_template,
        api::handlers::templates::list_templates,
        api::handlers::notifications::send_email,
        api::handlers::notifications::send_sms,
        api::handlers::messages::get_message_status,
        api::handlers::messages::list_messages,
        api::handlers::health::health,
    ),
    components(schemas(
        api::models::users::SignupRequest,
        api::models::users::SignupResponse,
        api::models::services::ServiceCreate,
        api::models::services::ServiceResponse,
        api::models::services::ServiceCreated,
        api::models::services::ServiceList,
        api::models::templates::TemplateCreate,
        api::models::templates::TemplateResponse,
        api::models::templates::TemplateCreated,
        api::models::templates::TemplateList,
        api::models::messages::SendEmailRequest,
        api::models::messages::SendSmsRequest,
        api::models::messages::SendResponse,
        api::models::messages::MessageStatusResponse,
        api::models::messages::MessageResponse,
        api::models::messages::MessageList,
        api::models::health::HealthResponse,
        MessageStatus,
        Channel,
    )),
    tags(
        (name = "auth", description = "User registration and API key issuance"),
        (name = "services", description = "Logical senders owned by a user"),
        (name = "templates", description = "Reusable message content attached to a service"),
        (name = "notifications", description = "Email and SMS dispatch"),
        (name = "messages", description = "Dispatched message records and delivery status"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;
