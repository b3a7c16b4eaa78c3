//! Caller identity extractor for axum.
//!
//! Identity is established upstream (the web app's session layer) and
//! forwarded in headers:
//!
//! ```text
//! X-User-Id: user_2abc...        (required)
//! X-User-Email: someone@host     (optional, account email)
//! ```
//!
//! Handlers take `AuthenticatedUser` as an argument; requests without a
//! usable `X-User-Id` are rejected with 401 before the handler runs.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::UserId;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Header carrying the caller's account email.
pub const USER_EMAIL_HEADER: &str = "X-User-Email";

/// Authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: Option<String>,
}

/// Rejection returned when no caller identity is present.
#[derive(Debug)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error_code": "AUTHENTICATION_REQUIRED",
            "message": "Authentication is required",
        });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_value(parts, USER_ID_HEADER)
            .and_then(|s| UserId::new(s).ok())
            .ok_or(AuthRejection)?;

        let email = header_value(parts, USER_EMAIL_HEADER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(AuthenticatedUser { user_id, email })
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}
