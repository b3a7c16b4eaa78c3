//! Membership domain module.
//!
//! Customer records, membership tiers, and the Stripe webhook vocabulary.
//!
//! # Module Structure
//!
//! - `customer` - Customer aggregate and partial updates
//! - `tier` - MembershipTier levels
//! - `subscription_status` - Stripe subscription lifecycle status
//! - `resolver` - (status, declared tier) -> effective tier
//! - `stripe_event` / `stripe_objects` - webhook payload vocabulary
//! - `webhook_verifier` / `webhook_errors` - signature checks and failures

mod customer;
mod errors;
mod resolver;
mod stripe_event;
mod stripe_objects;
mod subscription_status;
mod tier;
mod webhook_errors;
mod webhook_verifier;

pub use customer::{Customer, CustomerPatch};
pub use errors::CustomerError;
pub use resolver::resolve_membership;
pub use stripe_event::{StripeEvent, StripeEventData, StripeEventType};
pub use stripe_objects::{
    Expandable, ExpandedObject, StripeCheckoutSession, StripePrice, StripeSubscription,
    StripeSubscriptionItem, StripeSubscriptionItems,
};
pub use subscription_status::SubscriptionStatus;
pub use tier::{MembershipTier, MEMBERSHIP_METADATA_KEY};
pub use webhook_errors::{WebhookError, WebhookErrorKind, HANDLER_FAILED_MESSAGE};
pub use webhook_verifier::{sign_payload, SignatureHeader, StripeWebhookVerifier, DEFAULT_TOLERANCE_SECS};
