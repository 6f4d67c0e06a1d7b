//! Shared helpers for endpoint tests.

use std::time::Duration;

use axum_test::TestServer;
use serde_json::{json, Value};

use crate::{config::Config, Application};

/// Test server with the default 5 second delivery delay.
pub fn create_test_app() -> TestServer {
    create_test_app_with_delay(Duration::from_secs(5))
}

/// Test server with an explicit delivery delay. `Duration::ZERO` makes every
/// message immediately eligible for the lazy status transition.
pub fn create_test_app_with_delay(delay: Duration) -> TestServer {
    let mut config = Config::default();
    config.delivery.delay = delay;

    Application::new(config).into_test_server()
}

/// Register a user and return their API key.
pub async fn signup(server: &TestServer, email: &str) -> String {
    let response = server
        .post("/api/signup")
        .json(&json!({"email": email, "password": "hunter22"}))
        .await;
    response.assert_status_success();

    let body: Value = response.json();
    body["api_key"].as_str().expect("signup returns api_key").to_string()
}

/// Create a service and return its id.
pub async fn create_service(server: &TestServer, api_key: &str, name: &str) -> String {
    let response = server
        .post("/api/services")
        .add_header("X-API-Key", api_key)
        .json(&json!({"name": name}))
        .await;
    response.assert_status_success();

    let body: Value = response.json();
    body["service"]["id"].as_str().expect("service has id").to_string()
}

/// Create a service and a template under it, returning the template id.
pub async fn create_template(server: &TestServer, api_key: &str) -> String {
    let service_id = create_service(server, api_key, "alerts").await;

    let response = server
        .post("/api/templates")
        .add_header("X-API-Key", api_key)
        .json(&json!({
            "name": "welcome",
            "subject": "Welcome!",
            "body": "Glad you are here.",
            "service_id": service_id,
        }))
        .await;
    response.assert_status_success();

    let body: Value = response.json();
    body["template"]["id"].as_str().expect("template has id").to_string()
}

/// Dispatch an email through a template and return the message id.
pub async fn send_email(server: &TestServer, api_key: &str, template_id: &str, recipient: &str) -> String {
    let response = server
        .post("/api/notifications/email")
        .add_header("X-API-Key", api_key)
        .json(&json!({"template_id": template_id, "recipient_email": recipient}))
        .await;
    response.assert_status_success();

    let body: Value = response.json();
    body["message_id"].as_str().expect("send returns message_id").to_string()
}
