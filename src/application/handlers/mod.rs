//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod customer;
pub mod webhook;

pub use customer::{
    BillingData, CreateCustomerCommand, CreateCustomerHandler, CreateCustomerResult,
    FindCustomerByProviderIdHandler, FindCustomerByProviderIdQuery,
    FindCustomerByProviderIdResult, GetBillingDataHandler, GetBillingDataQuery,
    GetBillingDataResult, GetCustomerHandler, GetCustomerQuery, GetCustomerResult,
    UpdateCustomerCommand, UpdateCustomerHandler, UpdateCustomerResult,
};
pub use webhook::{HandleStripeWebhookCommand, HandleStripeWebhookHandler, HandleStripeWebhookResult};
