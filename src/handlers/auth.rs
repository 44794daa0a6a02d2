use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::Value;
use tracing::instrument;

use crate::models::{AccountResponse, LoginRequest, RegisterRequest, ServiceError};

use super::api::{service_error_to_response, ApiState};

/// Register a new account
#[instrument(name = "register", skip(state, request), fields(email = %request.email))]
pub async fn register(
    State(state): State<ApiState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), (StatusCode, Json<Value>)> {
    crate::info_with_trace!("Registering account for email: {}", request.email);

    match state
        .business
        .trace_account_operation("register", state.account_service.register(request))
        .await
    {
        Ok(account) => {
            crate::info_with_trace!("Successfully registered account: {}", account.id);
            Ok((StatusCode::CREATED, Json(account)))
        }
        Err(err @ ServiceError::EmailTaken { .. }) => {
            crate::warn_with_trace!("Registration rejected: {}", err);
            Err(service_error_to_response(err))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to register account: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Log in with an email and password
#[instrument(name = "login", skip(state, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<ApiState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AccountResponse>, (StatusCode, Json<Value>)> {
    crate::info_with_trace!("Logging in account for email: {}", request.email);

    match state
        .business
        .trace_account_operation("login", state.account_service.login(request))
        .await
    {
        Ok(account) => {
            crate::info_with_trace!("Successfully logged in account: {}", account.id);
            Ok(Json(account))
        }
        Err(err @ ServiceError::InvalidCredentials) => {
            crate::warn_with_trace!("Login rejected: {}", err);
            Err(service_error_to_response(err))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to log in: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Log out the current account
///
/// Sessions are held client side and the cart survives a logout, so this
/// only exists to give the storefront a symmetric endpoint to call.
#[instrument(name = "logout", skip(state))]
pub async fn logout(
    State(state): State<ApiState>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    crate::info_with_trace!("Logging out account");

    match state
        .business
        .trace_account_operation("logout", state.account_service.logout())
        .await
    {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(err) => {
            crate::error_with_trace!("Failed to log out: {}", err);
            Err(service_error_to_response(err))
        }
    }
}
