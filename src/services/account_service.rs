use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{
    AccountResponse, LoginRequest, RegisterRequest, ServiceError, ServiceResult, User, Validate,
};
use crate::repositories::AccountStore;

/// Service for the mock account flow. Registration and login exist so the
/// storefront can greet a signed-in user; nothing here gates access to the
/// cart, and logging out never touches cart state.
pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    /// Create a new AccountService
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Register a new account
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AccountResponse> {
        info!("Registering account");

        request.validate()?;

        if self.store.find_by_email(&request.email).await?.is_some() {
            warn!("Email already registered");
            return Err(ServiceError::EmailTaken {
                email: request.email,
            });
        }

        let user = User::new(request.name, request.email, request.password);
        self.store.insert_user(&user).await?;

        info!(user_id = %user.id, "Account registered");
        Ok(AccountResponse::from(&user))
    }

    /// Log into an existing account
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AccountResponse> {
        info!("Logging in");

        request.validate()?;

        // A missing account and a wrong password get the same answer
        let user = match self.store.find_by_email(&request.email).await? {
            Some(user) if user.password == request.password => user,
            _ => {
                warn!("Login rejected");
                return Err(ServiceError::InvalidCredentials);
            }
        };

        info!(user_id = %user.id, "Login succeeded");
        Ok(AccountResponse::from(&user))
    }

    /// End the client's signed-in state. Sessions live on the client, so
    /// there is nothing to tear down here, and the cart is left alone.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ServiceResult<()> {
        info!("Logging out");
        Ok(())
    }
}
