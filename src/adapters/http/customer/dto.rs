//! HTTP DTOs (Data Transfer Objects) for customer endpoints.
//!
//! These types define the JSON request/response structure for the customer API.
//! They serve as the boundary between HTTP and the application layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::BillingData;
use crate::domain::membership::{Customer, CustomerError, CustomerPatch, MembershipTier};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create the caller's customer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCustomerRequest {
    /// Starting tier (defaults to free).
    #[serde(default)]
    pub membership: Option<MembershipTier>,
}

/// Request to update the caller's customer. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCustomerRequest {
    #[serde(default)]
    pub membership: Option<MembershipTier>,
    #[serde(default)]
    pub provider_customer_id: Option<String>,
    #[serde(default)]
    pub provider_subscription_id: Option<String>,
}

impl UpdateCustomerRequest {
    /// Converts the request to a patch, rejecting blank ids.
    pub fn into_patch(self) -> Result<CustomerPatch, CustomerError> {
        let mut patch = CustomerPatch {
            membership: self.membership,
            ..CustomerPatch::default()
        };
        if let Some(id) = self.provider_customer_id {
            patch = patch.with_provider_customer_id(non_blank("provider_customer_id", id)?);
        }
        if let Some(id) = self.provider_subscription_id {
            patch = patch.with_provider_subscription_id(non_blank("provider_subscription_id", id)?);
        }
        Ok(patch)
    }
}

fn non_blank(field: &str, value: String) -> Result<String, CustomerError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CustomerError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Customer record for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub id: String,
    pub user_id: String,
    pub membership: MembershipTier,
    pub provider_customer_id: Option<String>,
    pub provider_subscription_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            user_id: customer.user_id.to_string(),
            membership: customer.membership,
            provider_customer_id: customer.provider_customer_id,
            provider_subscription_id: customer.provider_subscription_id,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

/// Response for `GET /api/customers/me`; `customer` is null when none exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetCustomerResponse {
    pub customer: Option<CustomerResponse>,
}

/// Billing page data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingDataResponse {
    pub customer: Option<CustomerResponse>,
    pub account_email: Option<String>,
    pub billing_email: Option<String>,
}

impl From<BillingData> for BillingDataResponse {
    fn from(data: BillingData) -> Self {
        Self {
            customer: data.customer.map(CustomerResponse::from),
            account_email: data.account_email,
            billing_email: data.billing_email,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
