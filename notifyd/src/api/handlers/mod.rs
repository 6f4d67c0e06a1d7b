//! HTTP request handlers for all API endpoints.
//!
//! Each handler is responsible for:
//! - Request validation and deserialization
//! - Authentication via the [`crate::auth::CurrentUser`] extractor
//! - Business logic execution via the in-memory [`crate::store::Store`]
//! - Response serialization
//!
//! # Handler Modules
//!
//! - [`auth`]: User signup and API key issuance
//! - [`services`]: Service creation and listing
//! - [`templates`]: Message template creation and listing
//! - [`notifications`]: Email and SMS dispatch
//! - [`messages`]: Message status queries and listing
//! - [`health`]: Unauthenticated table counts
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`] which converts to the appropriate
//! HTTP status code with a `{"error": <string>}` JSON body.

pub mod auth;
pub mod health;
pub mod messages;
pub mod notifications;
pub mod services;
pub mod templates;
