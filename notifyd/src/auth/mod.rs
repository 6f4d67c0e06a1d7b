//! Authentication: API key extraction and password hashing.
//!
//! Every authenticated endpoint resolves the caller through the
//! [`current_user::CurrentUser`] extractor, which maps the `X-API-Key`
//! request header to a registered user. There are no sessions, tokens, or
//! key rotation - the API key issued at signup is the sole credential.

pub mod current_user;
pub mod password;

pub use current_user::CurrentUser;

/// Request header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "X-API-Key";
