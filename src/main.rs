//! membership-sync server binary.
//!
//! Wires configuration, tracing, the customer store and the Stripe adapter
//! into the axum router and serves until Ctrl-C.

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use membership_sync::adapters::http::{app_router, CustomerAppState, WebhookAppState};
use membership_sync::adapters::{
    InMemoryCustomerRepository, PostgresCustomerRepository, StripeConfig, StripePaymentAdapter,
};
use membership_sync::application::CustomerMembershipSync;
use membership_sync::config::{AppConfig, CustomerStore, DatabaseConfig};
use membership_sync::domain::membership::StripeWebhookVerifier;
use membership_sync::ports::CustomerRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let repository = customer_repository(&config.database).await?;

    let stripe = StripePaymentAdapter::new(
        StripeConfig::new(config.payment.stripe_api_key.clone())
            .with_base_url(config.payment.stripe_api_base_url.clone())
            .with_timeout(config.payment.request_timeout()),
    )?;

    let verifier = StripeWebhookVerifier::new(config.payment.stripe_webhook_secret.clone())
        .with_tolerance(config.payment.webhook_tolerance_secs);
    if !verifier.has_secret() {
        tracing::warn!("No Stripe webhook secret configured; webhook deliveries will be rejected");
    }

    let app = app_router(
        CustomerAppState::new(repository.clone()),
        WebhookAppState {
            verifier,
            payment_provider: Arc::new(stripe),
            membership_sync: Arc::new(CustomerMembershipSync::new(repository)),
        },
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        stripe_test_mode = config.payment.is_test_mode(),
        "membership-sync listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("membership-sync stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins over
/// the configured level.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn customer_repository(
    database: &DatabaseConfig,
) -> Result<Arc<dyn CustomerRepository>, Box<dyn Error>> {
    if database.store()? == CustomerStore::Memory {
        tracing::warn!("Using in-memory customer store; data is lost on restart");
        return Ok(Arc::new(InMemoryCustomerRepository::new()));
    }

    let pool = database.pool_options().connect(database.url.trim()).await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(Arc::new(PostgresCustomerRepository::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
