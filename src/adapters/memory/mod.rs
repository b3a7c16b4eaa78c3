//! In-memory adapters for development and tests.

mod customer_repository;

pub use customer_repository::InMemoryCustomerRepository;
