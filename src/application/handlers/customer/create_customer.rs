//! CreateCustomerHandler - Command handler for creating a user's customer record.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::membership::{Customer, CustomerError, MembershipTier};
use crate::ports::CustomerRepository;

/// Command to create a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomerCommand {
    pub user_id: UserId,
    /// Starting tier; new accounts start on `Free`.
    pub membership: MembershipTier,
}

impl CreateCustomerCommand {
    /// A free-tier customer for `user_id`.
    pub fn free(user_id: UserId) -> Self {
        Self {
            user_id,
            membership: MembershipTier::Free,
        }
    }
}

/// Result of successful customer creation.
pub type CreateCustomerResult = Customer;

/// Handler for creating customers.
pub struct CreateCustomerHandler {
    repository: Arc<dyn CustomerRepository>,
}

impl CreateCustomerHandler {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateCustomerCommand,
    ) -> Result<CreateCustomerResult, CustomerError> {
        if self.repository.find_by_user_id(&cmd.user_id).await?.is_some() {
            return Err(CustomerError::already_exists(cmd.user_id));
        }

        let customer = Customer::new(cmd.user_id, cmd.membership);
        self.repository.insert(&customer).await?;

        tracing::info!(
            user_id = %customer.user_id,
            membership = %customer.membership,
            "Customer created"
        );

        Ok(customer)
    }
}
