//! HTTP middleware for axum.
//!
//! - `auth` - caller identity extractor

pub mod auth;

pub use auth::{AuthRejection, AuthenticatedUser, USER_EMAIL_HEADER, USER_ID_HEADER};
