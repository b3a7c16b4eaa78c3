//! Membership resolution.
//!
//! Maps a subscription status and the tier its product declares onto the
//! tier the customer actually gets. Pure: no I/O, no clock.

use super::subscription_status::SubscriptionStatus;
use super::tier::MembershipTier;

/// Returns the effective membership for a subscription.
///
/// `active` and `trialing` grant the declared tier. Every other status,
/// including ones this service does not recognize, resolves to `Free`.
pub fn resolve_membership(status: &SubscriptionStatus, declared: MembershipTier) -> MembershipTier {
    if status.grants_declared_tier() {
        declared
    } else {
        MembershipTier::Free
    }
}
