//! Foundation module - Shared domain primitives.
//!
//! Identifiers and error types shared by every part of the membership domain.

mod errors;
mod ids;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CustomerId, UserId};
