//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Webhook processing mutates customers only through `MembershipSync`;
//! client-facing handlers read and write through `CustomerRepository`.

pub mod handlers;
mod membership_sync;

pub use membership_sync::CustomerMembershipSync;

pub use handlers::{
    // Customer handlers
    BillingData, CreateCustomerCommand, CreateCustomerHandler, FindCustomerByProviderIdHandler,
    FindCustomerByProviderIdQuery, GetBillingDataHandler, GetBillingDataQuery, GetCustomerHandler,
    GetCustomerQuery, UpdateCustomerCommand, UpdateCustomerHandler,
    // Webhook handlers
    HandleStripeWebhookCommand, HandleStripeWebhookHandler, HandleStripeWebhookResult,
};
