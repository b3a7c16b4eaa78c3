//! Customer handlers.
//!
//! Client-facing reads and writes of a user's customer record.
//!
//! ## Commands
//! - Creating a customer
//! - Updating a customer's membership or Stripe ids
//!
//! ## Queries
//! - Get the caller's customer
//! - Billing data for the billing page
//! - Lookup by Stripe customer id (operators)

mod create_customer;
mod find_customer_by_provider_id;
mod get_billing_data;
mod get_customer;
mod update_customer;

// Commands
pub use create_customer::{CreateCustomerCommand, CreateCustomerHandler, CreateCustomerResult};
pub use update_customer::{UpdateCustomerCommand, UpdateCustomerHandler, UpdateCustomerResult};

// Queries
pub use find_customer_by_provider_id::{
    FindCustomerByProviderIdHandler, FindCustomerByProviderIdQuery, FindCustomerByProviderIdResult,
};
pub use get_billing_data::{BillingData, GetBillingDataHandler, GetBillingDataQuery, GetBillingDataResult};
pub use get_customer::{GetCustomerHandler, GetCustomerQuery, GetCustomerResult};
