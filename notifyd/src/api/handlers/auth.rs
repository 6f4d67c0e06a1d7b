use axum::{extract::State, http::StatusCode, Json};

use crate::{
    api::models::users::{SignupRequest, SignupResponse},
    auth::password,
    errors::{Error, Result},
    AppState,
};

/// Register a new user account and issue their API key
#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = SignupRequest,
    tag = "auth",
    responses(
        (status = 201, description = "User registered successfully", body = SignupResponse),
        (status = 400, description = "Missing fields or invalid email"),
        (status = 409, description = "User already exists"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    let email = request.email.as_deref().map(str::trim).unwrap_or_default();
    let password = request.password.as_deref().unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(Error::BadRequest {
            message: "Email and password are required".to_string(),
        });
    }

    // Minimal syntactic check, intentionally permissive
    let email = email.to_lowercase();
    if !email.contains('@') || !email.contains('.') {
        return Err(Error::BadRequest {
            message: "Invalid email format".to_string(),
        });
    }

    // Hash the password on a blocking thread to avoid blocking the async runtime
    let password = password.to_string();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_string(&password))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("join password hashing task: {e}"),
        })??;

    let user = state.store.create_user(&email, password_hash)?;
    tracing::info!(email = %user.email, "new user registered");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully".to_string(),
            email: user.email,
            api_key: user.api_key,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::create_test_app;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_signup_returns_api_key_once() {
        let server = create_test_app();

        let response = server
            .post("/api/signup")
            .json(&json!({"email": "Alice@Example.com", "password": "hunter22"}))
            .await;
        assert_eq!(response.status_code(), 201);

        let body: Value = response.json();
        assert_eq!(body["email"], "alice@example.com");
        assert!(body["api_key"].as_str().unwrap().starts_with("nk-"));
    }

    #[tokio::test]
    async fn test_signup_missing_fields() {
        let server = create_test_app();

        let response = server.post("/api/signup").json(&json!({"email": "a@b.c"})).await;
        assert_eq!(response.status_code(), 400);

        let response = server.post("/api/signup").json(&json!({"password": "pw"})).await;
        assert_eq!(response.status_code(), 400);

        let response = server
            .post("/api/signup")
            .json(&json!({"email": "   ", "password": "pw"}))
            .await;
        assert_eq!(response.status_code(), 400);
    }

    #[tokio::test]
    async fn test_signup_rejects_malformed_email() {
        let server = create_test_app();

        let response = server
            .post("/api/signup")
            .json(&json!({"email": "not-an-email", "password": "pw"}))
            .await;
        assert_eq!(response.status_code(), 400);

        let body: Value = response.json();
        assert_eq!(body["error"], "Invalid email format");
    }

    #[tokio::test]
    async fn test_duplicate_signup_conflicts() {
        let server = create_test_app();

        let first = server
            .post("/api/signup")
            .json(&json!({"email": "dup@example.com", "password": "first"}))
            .await;
        assert_eq!(first.status_code(), 201);

        // Same normalized email, different password: still a conflict
        let second = server
            .post("/api/signup")
            .json(&json!({"email": "  DUP@example.com", "password": "second"}))
            .await;
        assert_eq!(second.status_code(), 409);

        let body: Value = second.json();
        assert_eq!(body["error"], "User already exists");
    }
}
