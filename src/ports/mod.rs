//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CustomerRepository` - customer persistence with uniqueness rules
//! - `MembershipSync` - the two webhook-driven customer transitions
//! - `PaymentProvider` - Stripe subscription and product lookups

mod customer_repository;
mod membership_sync;
mod payment_provider;

pub use customer_repository::CustomerRepository;
pub use membership_sync::{LinkCustomer, LinkOutcome, MembershipSync, SubscriptionUpdate};
pub use payment_provider::{
    PaymentError, PaymentErrorCode, PaymentProvider, Product, Subscription,
};
