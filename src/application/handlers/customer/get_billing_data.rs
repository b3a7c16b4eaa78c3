//! GetBillingDataHandler - Query handler for the billing page.
//!
//! The billing email is the account email, shown only once the customer is
//! linked to a Stripe customer.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::UserId;
use crate::domain::membership::{Customer, CustomerError};
use crate::ports::CustomerRepository;

/// Query for a user's billing data.
#[derive(Debug, Clone)]
pub struct GetBillingDataQuery {
    pub user_id: UserId,
    /// Primary email of the signed-in account, if known.
    pub account_email: Option<String>,
}

/// Billing data for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingData {
    pub customer: Option<Customer>,
    pub account_email: Option<String>,
    pub billing_email: Option<String>,
}

/// Result of successful billing query.
pub type GetBillingDataResult = BillingData;

/// Handler for retrieving billing data.
pub struct GetBillingDataHandler {
    repository: Arc<dyn CustomerRepository>,
}

impl GetBillingDataHandler {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetBillingDataQuery,
    ) -> Result<GetBillingDataResult, CustomerError> {
        let customer = self
            .repository
            .find_by_user_id(&query.user_id)
            .await
            .map_err(|e| CustomerError::infrastructure(e.to_string()))?;

        let account_email = query.account_email.filter(|email| !email.trim().is_empty());
        let billing_email = match &customer {
            Some(c) if c.is_linked() => account_email.clone(),
            _ => None,
        };

        Ok(BillingData {
            customer,
            account_email,
            billing_email,
        })
    }
}
