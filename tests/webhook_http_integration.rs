//! Integration tests for the Stripe webhook endpoint.
//!
//! These tests drive the full router with signed deliveries:
//! 1. Verification failures are rejected with their detail and change nothing
//! 2. Subscription and checkout events update the customer store
//! 3. Post-verification failures return the generic handler message

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use membership_sync::adapters::http::{app_router, CustomerAppState, WebhookAppState};
use membership_sync::adapters::{InMemoryCustomerRepository, MockPaymentProvider};
use membership_sync::application::CustomerMembershipSync;
use membership_sync::domain::foundation::UserId;
use membership_sync::domain::membership::{
    sign_payload, Customer, MembershipTier, StripeWebhookVerifier, SubscriptionStatus,
    HANDLER_FAILED_MESSAGE,
};
use membership_sync::ports::CustomerRepository;

const SECRET: &str = "whsec_integration";

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    repo: Arc<InMemoryCustomerRepository>,
    provider: MockPaymentProvider,
}

impl TestApp {
    fn new() -> Self {
        Self::with_secret(Some(SECRET))
    }

    fn with_secret(secret: Option<&str>) -> Self {
        let repo = Arc::new(InMemoryCustomerRepository::new());
        let provider = MockPaymentProvider::new();
        provider.add_product(MockPaymentProvider::product("prod_pro", "pro"));

        let verifier =
            StripeWebhookVerifier::new(secret.map(|s| SecretString::new(s.to_string())));
        let router = app_router(
            CustomerAppState::new(repo.clone()),
            WebhookAppState {
                verifier,
                payment_provider: Arc::new(provider.clone()),
                membership_sync: Arc::new(CustomerMembershipSync::new(repo.clone())),
            },
            Duration::from_secs(5),
        );

        Self {
            router,
            repo,
            provider,
        }
    }

    async fn seed(&self, customer: Customer) {
        self.repo.insert(&customer).await.unwrap();
    }

    async fn customer(&self, user_id: &str) -> Option<Customer> {
        self.repo
            .find_by_user_id(&UserId::new(user_id).unwrap())
            .await
            .unwrap()
    }

    async fn deliver(&self, payload: Vec<u8>, signature: Option<String>) -> (StatusCode, Value) {
        let mut request = Request::post("/stripe/webhooks").header("content-type", "application/json");
        if let Some(signature) = signature {
            request = request.header("Stripe-Signature", signature);
        }
        let response = self
            .router
            .clone()
            .oneshot(request.body(Body::from(payload)).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn deliver_signed(&self, event: Value) -> (StatusCode, Value) {
        let payload = serde_json::to_vec(&event).unwrap();
        let signature = sign_payload(SECRET, chrono::Utc::now().timestamp(), &payload);
        self.deliver(payload, Some(signature)).await
    }
}

fn event(event_type: &str, object: Value) -> Value {
    json!({
        "id": "evt_1",
        "object": "event",
        "type": event_type,
        "livemode": false,
        "data": { "object": object }
    })
}

fn subscription(status: &str) -> Value {
    json!({
        "id": "sub_1",
        "object": "subscription",
        "customer": "cus_1",
        "status": status,
        "items": { "data": [{"id": "si_1", "price": {"id": "price_1", "product": "prod_pro"}}] }
    })
}

fn linked(user_id: &str, tier: MembershipTier) -> Customer {
    Customer::linked(UserId::new(user_id).unwrap(), "cus_1", "sub_0", tier)
}

// =============================================================================
// Verification
// =============================================================================

#[tokio::test]
async fn missing_signature_returns_400_with_detail() {
    let app = TestApp::new();
    app.seed(linked("u1", MembershipTier::Free)).await;
    let payload =
        serde_json::to_vec(&event("customer.subscription.updated", subscription("active"))).unwrap();

    let (status, body) = app.deliver(payload, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Webhook secret or signature missing"}));
    assert_eq!(app.customer("u1").await.unwrap().membership, MembershipTier::Free);
}

#[tokio::test]
async fn unconfigured_secret_returns_400() {
    let app = TestApp::with_secret(None);

    let (status, body) = app
        .deliver_signed(event("customer.subscription.updated", subscription("active")))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Webhook secret or signature missing");
}

#[tokio::test]
async fn wrong_secret_returns_400_and_changes_nothing() {
    let app = TestApp::new();
    app.seed(linked("u1", MembershipTier::Free)).await;
    let payload =
        serde_json::to_vec(&event("customer.subscription.updated", subscription("active"))).unwrap();
    let signature = sign_payload("whsec_other", chrono::Utc::now().timestamp(), &payload);

    let (status, body) = app.deliver(payload, Some(signature)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "No signatures found matching the expected signature for payload"
    );
    assert_eq!(app.customer("u1").await.unwrap().membership, MembershipTier::Free);
    assert!(app.provider.calls().is_empty());
}

#[tokio::test]
async fn stale_timestamp_returns_400() {
    let app = TestApp::new();
    let payload =
        serde_json::to_vec(&event("customer.subscription.updated", subscription("active"))).unwrap();
    let signature = sign_payload(SECRET, chrono::Utc::now().timestamp() - 3600, &payload);

    let (status, body) = app.deliver(payload, Some(signature)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Timestamp outside the tolerance zone");
}

// =============================================================================
// Event Handling
// =============================================================================

#[tokio::test]
async fn unrelated_event_is_acknowledged() {
    let app = TestApp::new();

    let (status, body) = app
        .deliver_signed(event("customer.created", json!({"id": "cus_1"})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"received": true}));
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn subscription_updated_upgrades_customer() {
    let app = TestApp::new();
    app.seed(linked("u1", MembershipTier::Free)).await;

    let (status, body) = app
        .deliver_signed(event("customer.subscription.updated", subscription("active")))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"received": true}));
    let customer = app.customer("u1").await.unwrap();
    assert_eq!(customer.membership, MembershipTier::Pro);
    assert_eq!(customer.provider_subscription_id.as_deref(), Some("sub_1"));
}

#[tokio::test]
async fn subscription_deleted_downgrades_customer() {
    let app = TestApp::new();
    app.seed(linked("u1", MembershipTier::Pro)).await;

    let (status, _) = app
        .deliver_signed(event("customer.subscription.deleted", subscription("canceled")))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.customer("u1").await.unwrap().membership, MembershipTier::Free);
}

#[tokio::test]
async fn redelivered_event_leaves_same_record() {
    let app = TestApp::new();
    app.seed(linked("u1", MembershipTier::Free)).await;
    let delivery = event("customer.subscription.updated", subscription("active"));

    app.deliver_signed(delivery.clone()).await;
    let once = app.customer("u1").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (status, _) = app.deliver_signed(delivery).await;
    let twice = app.customer("u1").await.unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(once, twice);
    assert_eq!(app.repo.len().await, 1);
}

#[tokio::test]
async fn checkout_completed_creates_customer() {
    let app = TestApp::new();
    app.provider.add_subscription(MockPaymentProvider::subscription(
        "sub_1",
        "cus_1",
        SubscriptionStatus::Active,
        "prod_pro",
    ));
    let session = json!({
        "id": "cs_1",
        "object": "checkout.session",
        "mode": "subscription",
        "client_reference_id": "u1",
        "customer": "cus_1",
        "subscription": "sub_1"
    });

    let (status, body) = app
        .deliver_signed(event("checkout.session.completed", session))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"received": true}));
    let customer = app.customer("u1").await.unwrap();
    assert_eq!(customer.membership, MembershipTier::Pro);
    assert_eq!(customer.provider_customer_id.as_deref(), Some("cus_1"));
    assert_eq!(customer.provider_subscription_id.as_deref(), Some("sub_1"));
}

#[tokio::test]
async fn checkout_in_payment_mode_changes_nothing() {
    let app = TestApp::new();
    let session = json!({
        "id": "cs_1",
        "mode": "payment",
        "client_reference_id": "u1",
        "customer": "cus_1",
        "subscription": null
    });

    let (status, _) = app
        .deliver_signed(event("checkout.session.completed", session))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(app.repo.is_empty().await);
}

// =============================================================================
// Handler Failures
// =============================================================================

#[tokio::test]
async fn checkout_without_reference_id_returns_generic_error() {
    let app = TestApp::new();
    let session = json!({
        "id": "cs_1",
        "mode": "subscription",
        "customer": "cus_1",
        "subscription": "sub_1"
    });

    let (status, body) = app
        .deliver_signed(event("checkout.session.completed", session))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": HANDLER_FAILED_MESSAGE}));
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn subscription_for_unknown_customer_returns_generic_error() {
    let app = TestApp::new();

    let (status, body) = app
        .deliver_signed(event("customer.subscription.updated", subscription("active")))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], HANDLER_FAILED_MESSAGE);
    assert!(app.repo.is_empty().await);
}
