//! API request/response models.
//!
//! "Required" request fields are declared as `Option` and validated by the
//! handlers, so a missing field yields a 400 with a readable message instead
//! of axum's 422 deserialization rejection.

pub mod health;
pub mod messages;
pub mod services;
pub mod templates;
pub mod users;
