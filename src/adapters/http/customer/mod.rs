//! HTTP adapter for customer endpoints.
//!
//! Exposes the client-facing customer helpers via REST API:
//! - `POST /api/customers` - Create the caller's customer
//! - `GET /api/customers/me` - Get the caller's customer
//! - `PATCH /api/customers/me` - Update the caller's customer
//! - `GET /api/customers/me/billing` - Billing page data
//! - `GET /api/customers/by-provider/:id` - Lookup by Stripe customer id

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{CustomerApiError, CustomerAppState};
pub use routes::{customer_router, customer_routes};
