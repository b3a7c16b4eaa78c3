//! GetCustomerHandler - Query handler for a user's own customer record.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::membership::{Customer, CustomerError};
use crate::ports::CustomerRepository;

/// Query to get a user's customer.
#[derive(Debug, Clone)]
pub struct GetCustomerQuery {
    pub user_id: UserId,
}

/// Result of successful customer query.
pub type GetCustomerResult = Option<Customer>;

/// Handler for retrieving a customer by user.
///
/// Returns `None` if the user has never been given a customer record.
pub struct GetCustomerHandler {
    repository: Arc<dyn CustomerRepository>,
}

impl GetCustomerHandler {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetCustomerQuery) -> Result<GetCustomerResult, CustomerError> {
        self.repository
            .find_by_user_id(&query.user_id)
            .await
            .map_err(|e| CustomerError::infrastructure(e.to_string()))
    }
}
