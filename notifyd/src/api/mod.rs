//! HTTP API layer: axum handlers and request/response models.

pub mod handlers;
pub mod models;
