//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter for endpoint exposure.

pub mod customer;
pub mod middleware;
mod router;
pub mod webhook;

// Re-export key types for convenience
pub use customer::{customer_router, CustomerAppState};
pub use router::{app_router, health};
pub use webhook::{webhook_router, WebhookAppState};
