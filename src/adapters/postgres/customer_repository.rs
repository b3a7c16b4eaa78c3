//! PostgreSQL implementation of CustomerRepository.
//!
//! Provides persistent storage for Customer records using PostgreSQL.
//! Uniqueness is enforced by the `customers_user_id_key` and
//! `customers_provider_customer_id_key` constraints (see `migrations/`).

use crate::domain::foundation::{CustomerId, DomainError, ErrorCode, UserId};
use crate::domain::membership::{Customer, CustomerPatch, MembershipTier};
use crate::ports::CustomerRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const USER_ID_CONSTRAINT: &str = "customers_user_id_key";
const PROVIDER_CUSTOMER_ID_CONSTRAINT: &str = "customers_provider_customer_id_key";

const SELECT_COLUMNS: &str = "id, user_id, membership, provider_customer_id, \
     provider_subscription_id, created_at, updated_at";

/// PostgreSQL implementation of the CustomerRepository port.
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    /// Creates a new PostgresCustomerRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a customer.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    user_id: String,
    membership: String,
    provider_customer_id: Option<String>,
    provider_subscription_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = DomainError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        Ok(Customer {
            id: CustomerId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            membership: parse_membership(&row.membership)?,
            provider_customer_id: row.provider_customer_id,
            provider_subscription_id: row.provider_subscription_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn parse_membership(s: &str) -> Result<MembershipTier, DomainError> {
    s.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid membership value: {}", s),
        )
    })
}

/// Maps a write failure onto the domain's conflict codes where possible.
fn map_write_error(e: sqlx::Error, context: &str, customer: Option<&Customer>) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.constraint() {
            Some(USER_ID_CONSTRAINT) => {
                let err = DomainError::new(ErrorCode::CustomerExists, "Customer already exists");
                return match customer {
                    Some(c) => err.with_detail("user_id", c.user_id.as_str()),
                    None => err,
                };
            }
            Some(PROVIDER_CUSTOMER_ID_CONSTRAINT) => {
                let err = DomainError::new(
                    ErrorCode::ProviderCustomerConflict,
                    "Provider customer is already linked to another customer",
                );
                return match customer.and_then(|c| c.provider_customer_id.as_deref()) {
                    Some(id) => err.with_detail("provider_customer_id", id),
                    None => err,
                };
            }
            _ => {}
        }
    }
    DomainError::database(format!("{}: {}", context, e))
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Customer>, DomainError> {
        let query = format!("SELECT {} FROM customers WHERE user_id = $1", SELECT_COLUMNS);
        let row: Option<CustomerRow> = sqlx::query_as(&query)
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to find customer: {}", e)))?;

        row.map(Customer::try_from).transpose()
    }

    async fn find_by_provider_customer_id(
        &self,
        provider_customer_id: &str,
    ) -> Result<Option<Customer>, DomainError> {
        let query = format!(
            "SELECT {} FROM customers WHERE provider_customer_id = $1",
            SELECT_COLUMNS
        );
        let row: Option<CustomerRow> = sqlx::query_as(&query)
            .bind(provider_customer_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to find customer: {}", e)))?;

        row.map(Customer::try_from).transpose()
    }

    async fn insert(&self, customer: &Customer) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO customers (
                id, user_id, membership, provider_customer_id, provider_subscription_id,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(customer.id.as_uuid())
        .bind(customer.user_id.as_str())
        .bind(customer.membership.as_str())
        .bind(&customer.provider_customer_id)
        .bind(&customer.provider_subscription_id)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to insert customer", Some(customer)))?;

        Ok(())
    }

    async fn patch(&self, id: &CustomerId, patch: &CustomerPatch) -> Result<Customer, DomainError> {
        let query = format!(
            r#"
            UPDATE customers SET
                membership = COALESCE($2, membership),
                provider_customer_id = COALESCE($3, provider_customer_id),
                provider_subscription_id = COALESCE($4, provider_subscription_id),
                updated_at = CASE
                    WHEN (membership, provider_customer_id, provider_subscription_id)
                        IS DISTINCT FROM
                        (COALESCE($2, membership),
                         COALESCE($3, provider_customer_id),
                         COALESCE($4, provider_subscription_id))
                    THEN $5
                    ELSE updated_at
                END
            WHERE id = $1
            RETURNING {}
            "#,
            SELECT_COLUMNS
        );

        let row: Option<CustomerRow> = sqlx::query_as(&query)
            .bind(id.as_uuid())
            .bind(patch.membership.map(|m| m.as_str()))
            .bind(&patch.provider_customer_id)
            .bind(&patch.provider_subscription_id)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                let err = map_write_error(e, "Failed to patch customer", None);
                match patch.provider_customer_id.as_deref() {
                    Some(pid) if err.code == ErrorCode::ProviderCustomerConflict => {
                        err.with_detail("provider_customer_id", pid)
                    }
                    _ => err,
                }
            })?;

        match row {
            Some(row) => Customer::try_from(row),
            None => Err(DomainError::new(ErrorCode::CustomerNotFound, "Customer not found")),
        }
    }
}
