//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresCustomerRepository` - customer records with uniqueness constraints

mod customer_repository;

pub use customer_repository::PostgresCustomerRepository;
