//! HTTP handlers for customer endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::middleware::AuthenticatedUser;
use crate::application::{
    CreateCustomerCommand, CreateCustomerHandler, FindCustomerByProviderIdHandler,
    FindCustomerByProviderIdQuery, GetBillingDataHandler, GetBillingDataQuery,
    GetCustomerHandler, GetCustomerQuery, UpdateCustomerCommand, UpdateCustomerHandler,
};
use crate::domain::membership::CustomerError;
use crate::ports::CustomerRepository;

use super::dto::{
    BillingDataResponse, CreateCustomerRequest, CustomerResponse, ErrorResponse,
    GetCustomerResponse, UpdateCustomerRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for customer endpoints.
#[derive(Clone)]
pub struct CustomerAppState {
    pub customer_repository: Arc<dyn CustomerRepository>,
}

impl CustomerAppState {
    pub fn new(customer_repository: Arc<dyn CustomerRepository>) -> Self {
        Self {
            customer_repository,
        }
    }

    pub fn get_customer_handler(&self) -> GetCustomerHandler {
        GetCustomerHandler::new(self.customer_repository.clone())
    }

    pub fn create_customer_handler(&self) -> CreateCustomerHandler {
        CreateCustomerHandler::new(self.customer_repository.clone())
    }

    pub fn update_customer_handler(&self) -> UpdateCustomerHandler {
        UpdateCustomerHandler::new(self.customer_repository.clone())
    }

    pub fn billing_data_handler(&self) -> GetBillingDataHandler {
        GetBillingDataHandler::new(self.customer_repository.clone())
    }

    pub fn find_by_provider_handler(&self) -> FindCustomerByProviderIdHandler {
        FindCustomerByProviderIdHandler::new(self.customer_repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/customers/me - Get the caller's customer
pub async fn get_customer(
    State(state): State<CustomerAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, CustomerApiError> {
    let result = state
        .get_customer_handler()
        .handle(GetCustomerQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(GetCustomerResponse {
        customer: result.map(CustomerResponse::from),
    }))
}

/// GET /api/customers/me/billing - Billing page data
pub async fn get_billing_data(
    State(state): State<CustomerAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, CustomerApiError> {
    let result = state
        .billing_data_handler()
        .handle(GetBillingDataQuery {
            user_id: user.user_id,
            account_email: user.email,
        })
        .await?;

    Ok(Json(BillingDataResponse::from(result)))
}

/// GET /api/customers/by-provider/:provider_customer_id - Operator lookup
pub async fn find_by_provider_customer_id(
    State(state): State<CustomerAppState>,
    _user: AuthenticatedUser,
    Path(provider_customer_id): Path<String>,
) -> Result<impl IntoResponse, CustomerApiError> {
    let customer = state
        .find_by_provider_handler()
        .handle(FindCustomerByProviderIdQuery {
            provider_customer_id,
        })
        .await?;

    Ok(Json(CustomerResponse::from(customer)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/PATCH endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/customers - Create the caller's customer
///
/// The body is optional; without one the customer starts on the free tier.
pub async fn create_customer(
    State(state): State<CustomerAppState>,
    user: AuthenticatedUser,
    request: Option<Json<CreateCustomerRequest>>,
) -> Result<impl IntoResponse, CustomerApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let mut cmd = CreateCustomerCommand::free(user.user_id);
    if let Some(membership) = request.membership {
        cmd.membership = membership;
    }

    let customer = state.create_customer_handler().handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}

/// PATCH /api/customers/me - Update supplied fields of the caller's customer
pub async fn update_customer(
    State(state): State<CustomerAppState>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, CustomerApiError> {
    let cmd = UpdateCustomerCommand {
        user_id: user.user_id,
        patch: request.into_patch()?,
    };

    let customer = state.update_customer_handler().handle(cmd).await?;

    Ok(Json(CustomerResponse::from(customer)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts customer errors to HTTP responses.
#[derive(Debug)]
pub struct CustomerApiError(CustomerError);

impl From<CustomerError> for CustomerApiError {
    fn from(err: CustomerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CustomerApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            CustomerError::NotFoundForUser(_) | CustomerError::NotFoundForProvider(_) => {
                (StatusCode::NOT_FOUND, "CUSTOMER_NOT_FOUND")
            }
            CustomerError::AlreadyExists(_) => (StatusCode::CONFLICT, "CUSTOMER_EXISTS"),
            CustomerError::ProviderCustomerTaken(_) => {
                (StatusCode::CONFLICT, "PROVIDER_CUSTOMER_CONFLICT")
            }
            CustomerError::ValidationFailed { .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
            }
            CustomerError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Customer request failed");
        }

        let message = match &self.0 {
            CustomerError::Infrastructure(_) => "An internal error occurred".to_string(),
            other => other.message(),
        };
        (status, Json(ErrorResponse::new(error_code, message))).into_response()
    }
}
