//! notifyd is a multi-tenant notification dispatch service.
//!
//! Users register with an email and password and receive an API key. With
//! that key they create *services* (logical senders), attach *templates*
//! (reusable subject/body content) to them, and dispatch email or SMS
//! notifications rendered from a template. Delivery is simulated: a message
//! stays `pending` for a configurable delay, after which querying its status
//! lazily draws an outcome from a weighted distribution.
//!
//! All state is held in memory behind a single lock ([`store::Store`]) and is
//! lost on restart. Interactive API documentation is served at `/docs`.

pub mod api;
pub mod auth;
pub mod config;
pub mod crypto;
pub mod delivery;
pub mod errors;
pub mod openapi;
pub mod store;
pub mod telemetry;
#[cfg(test)]
pub mod test_utils;
pub mod types;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use config::Config;
pub use types::{MessageId, ServiceId, TemplateId};

use openapi::ApiDoc;
use store::Store;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Config,
}

/// Build the application router with all endpoints and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/signup", post(api::handlers::auth::signup))
        .route(
            "/services",
            get(api::handlers::services::list_services).post(api::handlers::services::create_service),
        )
        .route(
            "/templates",
            get(api::handlers::templates::list_templates).post(api::handlers::templates::create_template),
        )
        .route("/notifications/email", post(api::handlers::notifications::send_email))
        .route("/notifications/sms", post(api::handlers::notifications::send_sms))
        .route("/messages", get(api::handlers::messages::list_messages))
        .route("/messages/{id}/status", get(api::handlers::messages::get_message_status))
        .route("/health", get(api::handlers::health::health))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .route(
            "/api-docs/openapi.json",
            get(|| async { axum::Json(ApiDoc::openapi()) }),
        )
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        // Browser clients call this from arbitrary origins; auth is header
        // based, not cookie based, so a permissive policy is fine.
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// The assembled application, ready to serve or drive in tests.
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    pub fn new(config: Config) -> Self {
        let state = AppState {
            store: Store::new(config.delivery.delay),
            config: config.clone(),
        };
        let router = build_router(state);

        Self { router, config }
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "notifyd listening on http://{}, docs at http://localhost:{}/docs",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::create_test_app;
    use serde_json::Value;

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let server = create_test_app();
        let response = server.get("/api/nope").await;
        assert_eq!(response.status_code(), 404);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let server = create_test_app();
        let response = server.get("/api-docs/openapi.json").await;
        assert_eq!(response.status_code(), 200);

        let body: Value = response.json();
        assert_eq!(body["info"]["title"], "notifyd");
    }

    #[tokio::test]
    async fn test_errors_use_json_envelope() {
        let server = create_test_app();

        // Unauthenticated request to a protected route
        let response = server.get("/api/services").await;
        assert_eq!(response.status_code(), 401);

        let body: Value = response.json();
        assert!(body["error"].as_str().is_some());
    }
}
