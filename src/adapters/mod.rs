//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - axum routes for webhooks and the customer API
//! - `memory` - in-memory customer store
//! - `postgres` - PostgreSQL customer store
//! - `stripe` - Stripe REST lookups and a test double

pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;

pub use memory::InMemoryCustomerRepository;
pub use postgres::PostgresCustomerRepository;
pub use stripe::{MockPaymentProvider, StripeConfig, StripePaymentAdapter};
