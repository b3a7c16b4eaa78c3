//! Axum router configuration for customer endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_customer, find_by_provider_customer_id, get_billing_data, get_customer,
    update_customer, CustomerAppState,
};

/// Create the customer API router.
///
/// # Routes
///
/// All routes require `X-User-Id`.
/// - `POST /` - Create the caller's customer
/// - `GET /me` - Get the caller's customer
/// - `PATCH /me` - Update the caller's customer
/// - `GET /me/billing` - Billing page data
/// - `GET /by-provider/:provider_customer_id` - Lookup by Stripe customer id
pub fn customer_routes() -> Router<CustomerAppState> {
    Router::new()
        .route("/", post(create_customer))
        .route("/me", get(get_customer).patch(update_customer))
        .route("/me/billing", get(get_billing_data))
        .route(
            "/by-provider/:provider_customer_id",
            get(find_by_provider_customer_id),
        )
}

/// Customer router mounted at `/customers`, ready to nest under `/api`.
pub fn customer_router() -> Router<CustomerAppState> {
    Router::new().nest("/customers", customer_routes())
}
