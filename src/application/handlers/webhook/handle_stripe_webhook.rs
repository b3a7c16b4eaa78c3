//! HandleStripeWebhookHandler - Command handler for Stripe webhook deliveries.
//!
//! Verifies the delivery, then turns the three membership-relevant events
//! into customer transitions:
//!
//! | Event | Transition |
//! |-------|------------|
//! | `customer.subscription.updated` | update by provider customer id |
//! | `customer.subscription.deleted` | update by provider customer id |
//! | `checkout.session.completed` (subscription mode) | link or create by user id |
//!
//! Every other verified event is acknowledged without side effects.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::membership::{
    resolve_membership, MembershipTier, StripeCheckoutSession, StripeEvent, StripeEventType,
    StripeSubscription, StripeWebhookVerifier, WebhookError, WebhookErrorKind,
};
use crate::ports::{LinkCustomer, MembershipSync, PaymentProvider, SubscriptionUpdate};

/// Command to handle one webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleStripeWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// `Stripe-Signature` header, if present.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleStripeWebhookResult {
    /// Subscription change applied to the linked customer.
    SubscriptionSynced {
        user_id: UserId,
        provider_customer_id: String,
        membership: MembershipTier,
    },
    /// Checkout linked the user to a Stripe customer.
    CheckoutLinked {
        user_id: UserId,
        membership: MembershipTier,
        created: bool,
    },
    /// Checkout outside subscription mode; nothing to do.
    CheckoutSkipped { mode: String },
    /// Event type this service does not act on.
    Ignored { event_type: String },
}

/// Handler for Stripe webhook deliveries.
///
/// The handler owns no state between requests. The customer store behind
/// `MembershipSync` is the only thing it mutates.
pub struct HandleStripeWebhookHandler {
    verifier: StripeWebhookVerifier,
    payment_provider: Arc<dyn PaymentProvider>,
    membership_sync: Arc<dyn MembershipSync>,
}

impl HandleStripeWebhookHandler {
    pub fn new(
        verifier: StripeWebhookVerifier,
        payment_provider: Arc<dyn PaymentProvider>,
        membership_sync: Arc<dyn MembershipSync>,
    ) -> Self {
        Self {
            verifier,
            payment_provider,
            membership_sync,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandleStripeWebhookCommand,
    ) -> Result<HandleStripeWebhookResult, WebhookError> {
        let event = self
            .verifier
            .verify_and_parse(&cmd.payload, cmd.signature.as_deref())
            .map_err(|err| {
                tracing::warn!(error = %err, "Stripe webhook verification failed");
                err
            })?;

        let result = match event.kind() {
            kind if kind.is_subscription_change() => self.handle_subscription_changed(&event).await,
            StripeEventType::CheckoutSessionCompleted => self.handle_checkout_completed(&event).await,
            _ => {
                tracing::debug!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    livemode = event.livemode,
                    "Ignoring Stripe event"
                );
                return Ok(HandleStripeWebhookResult::Ignored {
                    event_type: event.event_type,
                });
            }
        };

        if let Err(err) = &result {
            log_dispatch_failure(&event, err);
        }
        result
    }

    async fn handle_subscription_changed(
        &self,
        event: &StripeEvent,
    ) -> Result<HandleStripeWebhookResult, WebhookError> {
        let subscription: StripeSubscription = event.object()?;

        let product_ids = subscription.product_ids();
        let product_id = first_product(&subscription.id, &product_ids)?;
        let declared = self.declared_tier(product_id).await?;
        let membership = resolve_membership(&subscription.status, declared);

        let provider_customer_id = subscription.customer.id().to_string();
        let update = SubscriptionUpdate {
            provider_customer_id: provider_customer_id.clone(),
            provider_subscription_id: subscription.id.clone(),
            membership,
        };

        let customer = self
            .membership_sync
            .update_by_provider_customer_id(update)
            .await
            .map_err(|e| WebhookError::Store(e.to_string()))?
            .ok_or_else(|| WebhookError::CustomerNotFound(provider_customer_id.clone()))?;

        tracing::info!(
            event_id = %event.id,
            event_type = %event.event_type,
            livemode = event.livemode,
            user_id = %customer.user_id,
            provider_customer_id = %provider_customer_id,
            status = %subscription.status,
            membership = %membership,
            "Subscription change synced"
        );

        Ok(HandleStripeWebhookResult::SubscriptionSynced {
            user_id: customer.user_id,
            provider_customer_id,
            membership,
        })
    }

    async fn handle_checkout_completed(
        &self,
        event: &StripeEvent,
    ) -> Result<HandleStripeWebhookResult, WebhookError> {
        let session: StripeCheckoutSession = event.object()?;

        if !session.is_subscription() {
            tracing::debug!(
                event_id = %event.id,
                session_id = %session.id,
                mode = %session.mode,
                "Skipping checkout outside subscription mode"
            );
            return Ok(HandleStripeWebhookResult::CheckoutSkipped { mode: session.mode });
        }

        let user_id = session
            .reference_id()
            .and_then(|id| UserId::new(id).ok())
            .ok_or(WebhookError::MissingReferenceId)?;

        let subscription_id = session
            .subscription_id()
            .ok_or(WebhookError::MissingField("subscription"))?;

        let subscription = self
            .payment_provider
            .get_subscription(subscription_id)
            .await
            .map_err(|e| WebhookError::Provider(e.to_string()))?
            .ok_or_else(|| {
                WebhookError::Provider(format!("Subscription {} not found", subscription_id))
            })?;

        let product_id = first_product(&subscription.id, &subscription.product_ids)?;
        let declared = self.declared_tier(product_id).await?;
        let membership = resolve_membership(&subscription.status, declared);

        let provider_customer_id = session
            .customer_id()
            .unwrap_or(subscription.customer_id.as_str())
            .to_string();

        let outcome = self
            .membership_sync
            .link_provider_customer(LinkCustomer {
                user_id: user_id.clone(),
                provider_customer_id: provider_customer_id.clone(),
                provider_subscription_id: subscription.id.clone(),
                membership,
            })
            .await
            .map_err(|e| WebhookError::Store(e.to_string()))?;

        tracing::info!(
            event_id = %event.id,
            event_type = %event.event_type,
            livemode = event.livemode,
            user_id = %user_id,
            provider_customer_id = %provider_customer_id,
            membership = %membership,
            created = outcome.created,
            "Checkout linked to customer"
        );

        Ok(HandleStripeWebhookResult::CheckoutLinked {
            user_id,
            membership,
            created: outcome.created,
        })
    }

    /// Reads the tier a product grants from its `membership` metadata.
    async fn declared_tier(&self, product_id: &str) -> Result<MembershipTier, WebhookError> {
        let product = self
            .payment_provider
            .get_product(product_id)
            .await
            .map_err(|e| WebhookError::Provider(e.to_string()))?
            .ok_or_else(|| WebhookError::Provider(format!("Product {} not found", product_id)))?;

        let raw = product.declared_membership();
        raw.and_then(|value| MembershipTier::from_str(value).ok())
            .ok_or_else(|| WebhookError::InvalidDeclaredTier(raw.map(str::to_string)))
    }
}

/// Product of the first line item. Later items are not consulted.
fn first_product<'a>(
    subscription_id: &str,
    product_ids: &'a [String],
) -> Result<&'a str, WebhookError> {
    if product_ids.len() > 1 {
        tracing::warn!(
            subscription_id = %subscription_id,
            line_items = product_ids.len(),
            "Subscription has several line items; using the first"
        );
    }
    product_ids
        .first()
        .map(String::as_str)
        .ok_or_else(|| WebhookError::NoLineItems(subscription_id.to_string()))
}

fn log_dispatch_failure(event: &StripeEvent, err: &WebhookError) {
    match err.kind() {
        WebhookErrorKind::Integration => tracing::warn!(
            event_id = %event.id,
            event_type = %event.event_type,
            livemode = event.livemode,
            error = %err,
            "Stripe event could not be processed"
        ),
        kind => tracing::error!(
            event_id = %event.id,
            event_type = %event.event_type,
            livemode = event.livemode,
            error = %err,
            kind = ?kind,
            "Stripe webhook handler failed"
        ),
    }
}
