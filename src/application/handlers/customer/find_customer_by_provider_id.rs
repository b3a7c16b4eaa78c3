//! FindCustomerByProviderIdHandler - Query handler for operator lookups by
//! Stripe customer id.

use std::sync::Arc;

use crate::domain::membership::{Customer, CustomerError};
use crate::ports::CustomerRepository;

/// Query to find the customer linked to a Stripe customer.
#[derive(Debug, Clone)]
pub struct FindCustomerByProviderIdQuery {
    pub provider_customer_id: String,
}

/// Result of successful lookup.
pub type FindCustomerByProviderIdResult = Customer;

pub struct FindCustomerByProviderIdHandler {
    repository: Arc<dyn CustomerRepository>,
}

impl FindCustomerByProviderIdHandler {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: FindCustomerByProviderIdQuery,
    ) -> Result<FindCustomerByProviderIdResult, CustomerError> {
        let id = query.provider_customer_id.trim();
        if id.is_empty() {
            return Err(CustomerError::validation(
                "provider_customer_id",
                "must not be empty",
            ));
        }

        self.repository
            .find_by_provider_customer_id(id)
            .await
            .map_err(|e| CustomerError::infrastructure(e.to_string()))?
            .ok_or_else(|| CustomerError::not_found_for_provider(id))
    }
}
