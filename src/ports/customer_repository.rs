//! Customer repository port.
//!
//! Defines the contract for persisting and retrieving Customer records.
//!
//! # Design
//!
//! - **Uniqueness**: implementations reject a second customer for the same
//!   `user_id` (`CustomerExists`) or the same non-null
//!   `provider_customer_id` (`ProviderCustomerConflict`)
//! - **Atomic patch**: `patch` is a single read-modify-write; callers do no
//!   locking of their own

use crate::domain::foundation::{CustomerId, DomainError, UserId};
use crate::domain::membership::{Customer, CustomerPatch};
use async_trait::async_trait;

/// Repository port for Customer persistence.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find the customer owned by a user.
    ///
    /// Returns `None` if the user has no customer record.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Customer>, DomainError>;

    /// Find the customer linked to a Stripe customer id.
    async fn find_by_provider_customer_id(
        &self,
        provider_customer_id: &str,
    ) -> Result<Option<Customer>, DomainError>;

    /// Insert a new customer.
    ///
    /// # Errors
    ///
    /// - `CustomerExists` if the user already has a customer
    /// - `ProviderCustomerConflict` if the Stripe customer is already linked
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, customer: &Customer) -> Result<(), DomainError>;

    /// Apply a partial update and return the stored result.
    ///
    /// # Errors
    ///
    /// - `CustomerNotFound` if no customer has this id
    /// - `ProviderCustomerConflict` if the patch links an already-linked Stripe customer
    /// - `DatabaseError` on persistence failure
    async fn patch(&self, id: &CustomerId, patch: &CustomerPatch) -> Result<Customer, DomainError>;
}
