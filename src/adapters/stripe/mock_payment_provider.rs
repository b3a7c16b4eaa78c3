//! In-memory `PaymentProvider` standing in for the Stripe API.
//!
//! Holds a small catalog of subscriptions and products, records every lookup
//! and can be told to fail a given lookup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::membership::{SubscriptionStatus, MEMBERSHIP_METADATA_KEY};
use crate::ports::{PaymentError, PaymentProvider, Product, Subscription};

/// Lookup recorded by [`MockPaymentProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    GetSubscription(String),
    GetProduct(String),
}

impl ProviderCall {
    fn lookup(&self) -> Lookup {
        match self {
            Self::GetSubscription(_) => Lookup::Subscription,
            Self::GetProduct(_) => Lookup::Product,
        }
    }
}

/// Which lookup a configured failure applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    Subscription,
    Product,
}

/// Test double for the Stripe lookups. Clones share state, so a test can
/// keep a handle after passing a clone to the code under test.
///
/// ```ignore
/// let stripe = MockPaymentProvider::new();
/// stripe.add_product(MockPaymentProvider::product("prod_pro", "pro"));
/// stripe.fail(Lookup::Product, PaymentError::network("timeout"));
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<Catalog>>,
}

#[derive(Default)]
struct Catalog {
    subscriptions: HashMap<String, Subscription>,
    products: HashMap<String, Product>,
    failures: HashMap<Lookup, PaymentError>,
    calls: Vec<ProviderCall>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn catalog(&self) -> MutexGuard<'_, Catalog> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Product declaring `membership` in its metadata.
    pub fn product(id: &str, membership: &str) -> Product {
        Product {
            id: id.to_string(),
            metadata: HashMap::from([(
                MEMBERSHIP_METADATA_KEY.to_string(),
                membership.to_string(),
            )]),
        }
    }

    /// Subscription with a single line item.
    pub fn subscription(
        id: &str,
        customer_id: &str,
        status: SubscriptionStatus,
        product_id: &str,
    ) -> Subscription {
        Subscription {
            id: id.to_string(),
            customer_id: customer_id.to_string(),
            status,
            product_ids: vec![product_id.to_string()],
        }
    }

    pub fn add_subscription(&self, subscription: Subscription) {
        self.catalog()
            .subscriptions
            .insert(subscription.id.clone(), subscription);
    }

    pub fn add_product(&self, product: Product) {
        self.catalog().products.insert(product.id.clone(), product);
    }

    /// Every later `lookup` returns `error` until [`Self::recover`].
    pub fn fail(&self, lookup: Lookup, error: PaymentError) {
        self.catalog().failures.insert(lookup, error);
    }

    pub fn recover(&self) {
        self.catalog().failures.clear();
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.catalog().calls.clone()
    }

    pub fn lookups(&self, lookup: Lookup) -> usize {
        self.catalog()
            .calls
            .iter()
            .filter(|call| call.lookup() == lookup)
            .count()
    }

    fn record(&self, call: ProviderCall) -> Result<MutexGuard<'_, Catalog>, PaymentError> {
        let mut catalog = self.catalog();
        let lookup = call.lookup();
        catalog.calls.push(call);
        if let Some(error) = catalog.failures.get(&lookup).cloned() {
            return Err(error);
        }
        Ok(catalog)
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn get_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<Option<Subscription>, PaymentError> {
        let catalog = self.record(ProviderCall::GetSubscription(subscription_id.to_string()))?;
        Ok(catalog.subscriptions.get(subscription_id).cloned())
    }

    async fn get_product(&self, product_id: &str) -> Result<Option<Product>, PaymentError> {
        let catalog = self.record(ProviderCall::GetProduct(product_id.to_string()))?;
        Ok(catalog.products.get(product_id).cloned())
    }
}
