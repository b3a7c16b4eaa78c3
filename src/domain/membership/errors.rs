//! Customer-specific error types.
//!
//! Errors raised by the client-facing customer operations.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFoundForUser | 404 |
//! | NotFoundForProvider | 404 |
//! | AlreadyExists | 409 |
//! | ProviderCustomerTaken | 409 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Customer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerError {
    /// No customer exists for this user.
    NotFoundForUser(UserId),

    /// No customer is linked to this Stripe customer id.
    NotFoundForProvider(String),

    /// A customer already exists for this user.
    AlreadyExists(UserId),

    /// Another customer is already linked to this Stripe customer id.
    ProviderCustomerTaken(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl CustomerError {
    pub fn not_found_for_user(user_id: UserId) -> Self {
        CustomerError::NotFoundForUser(user_id)
    }

    pub fn not_found_for_provider(provider_customer_id: impl Into<String>) -> Self {
        CustomerError::NotFoundForProvider(provider_customer_id.into())
    }

    pub fn already_exists(user_id: UserId) -> Self {
        CustomerError::AlreadyExists(user_id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CustomerError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CustomerError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CustomerError::NotFoundForUser(_) | CustomerError::NotFoundForProvider(_) => {
                ErrorCode::CustomerNotFound
            }
            CustomerError::AlreadyExists(_) => ErrorCode::CustomerExists,
            CustomerError::ProviderCustomerTaken(_) => ErrorCode::ProviderCustomerConflict,
            CustomerError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CustomerError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            CustomerError::NotFoundForUser(user_id) => {
                format!("No customer found for user: {}", user_id)
            }
            CustomerError::NotFoundForProvider(id) => {
                format!("No customer linked to provider customer: {}", id)
            }
            CustomerError::AlreadyExists(_) => "Customer already exists".to_string(),
            CustomerError::ProviderCustomerTaken(id) => {
                format!("Provider customer {} is linked to another customer", id)
            }
            CustomerError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CustomerError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CustomerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CustomerError {}

/// Store errors arrive as `DomainError`; conflicts keep their meaning, the
/// rest collapse to infrastructure failures.
impl From<DomainError> for CustomerError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => CustomerError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::CustomerExists => match err.details.get("user_id").map(UserId::new) {
                Some(Ok(user_id)) => CustomerError::AlreadyExists(user_id),
                _ => CustomerError::Infrastructure(err.to_string()),
            },
            ErrorCode::ProviderCustomerConflict => CustomerError::ProviderCustomerTaken(
                err.details
                    .get("provider_customer_id")
                    .cloned()
                    .unwrap_or_default(),
            ),
            _ => CustomerError::Infrastructure(err.to_string()),
        }
    }
}

impl From<CustomerError> for DomainError {
    fn from(err: CustomerError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user_id() -> UserId {
        UserId::new("user-test-123").unwrap()
    }

    // ============================================================
    // Constructor Tests
    // ============================================================

    #[test]
    fn not_found_for_user_creates_correctly() {
        let user_id = test_user_id();
        let err = CustomerError::not_found_for_user(user_id.clone());
        assert!(matches!(err, CustomerError::NotFoundForUser(ref u) if *u == user_id));
        assert_eq!(err.code(), ErrorCode::CustomerNotFound);
    }

    #[test]
    fn not_found_for_provider_creates_correctly() {
        let err = CustomerError::not_found_for_provider("cus_123");
        assert_eq!(err.code(), ErrorCode::CustomerNotFound);
        assert!(err.message().contains("cus_123"));
    }

    #[test]
    fn already_exists_uses_fixed_message() {
        let err = CustomerError::already_exists(test_user_id());
        assert_eq!(err.code(), ErrorCode::CustomerExists);
        assert_eq!(err.message(), "Customer already exists");
    }

    #[test]
    fn validation_creates_correctly() {
        let err = CustomerError::validation("membership", "unknown tier");
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(err.message(), "Validation failed for 'membership': unknown tier");
    }

    // ============================================================
    // Conversion Tests
    // ============================================================

    #[test]
    fn converts_exists_domain_error_with_user_detail() {
        let domain = DomainError::new(ErrorCode::CustomerExists, "duplicate")
            .with_detail("user_id", "user-test-123");

        let err: CustomerError = domain.into();

        assert_eq!(err, CustomerError::AlreadyExists(test_user_id()));
    }

    #[test]
    fn converts_provider_conflict_domain_error() {
        let domain = DomainError::new(ErrorCode::ProviderCustomerConflict, "duplicate")
            .with_detail("provider_customer_id", "cus_1");

        let err: CustomerError = domain.into();

        assert_eq!(err, CustomerError::ProviderCustomerTaken("cus_1".to_string()));
    }

    #[test]
    fn converts_database_error_to_infrastructure() {
        let err: CustomerError = DomainError::database("connection reset").into();
        assert!(matches!(err, CustomerError::Infrastructure(_)));
    }

    #[test]
    fn converts_back_to_domain_error() {
        let domain: DomainError = CustomerError::already_exists(test_user_id()).into();
        assert_eq!(domain.code, ErrorCode::CustomerExists);
        assert_eq!(domain.message, "Customer already exists");
    }
}
