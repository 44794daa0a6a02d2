use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::models::{
    AddItemRequest, CartResponse, CheckoutRequest, CheckoutResponse, Product, ProductCategory,
    ProductListResponse, ServiceError, StoreError, UpdateQuantityRequest, UpdateSizeRequest,
};
use crate::observability::{observability_middleware, BusinessTracingMiddleware, Metrics};
use crate::services::{AccountService, CartService, CatalogService, CheckoutService};

use super::{
    auth, cors_middleware, health_check, metrics_handler, request_validation_middleware,
    security_headers_middleware,
};

/// Shared application state containing all services
#[derive(Clone)]
pub struct ApiState {
    pub catalog_service: Arc<CatalogService>,
    pub cart_service: Arc<CartService>,
    pub checkout_service: Arc<CheckoutService>,
    pub account_service: Arc<AccountService>,
    pub business: Arc<BusinessTracingMiddleware>,
}

/// Query parameters for listing products
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub category: Option<String>,
}

/// Build the full application router with middleware layers applied
pub fn create_app(metrics: Arc<Metrics>, state: ApiState) -> Router {
    let metrics_for_middleware = metrics.clone();

    Router::new()
        // Health and metrics endpoints (with metrics state)
        .route("/health/status", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        // Catalog endpoints (read-only)
        .route("/api/products", get(list_products))
        .route("/api/products/:product_id", get(get_product))
        // Cart management endpoints
        .route("/api/cart/:session_id", get(get_cart).delete(delete_cart))
        .route("/api/cart/:session_id/items", post(add_cart_item))
        .route(
            "/api/cart/:session_id/items/:product_id",
            put(update_cart_item).delete(remove_cart_item),
        )
        .route(
            "/api/cart/:session_id/items/:product_id/size",
            put(update_cart_item_size),
        )
        .route("/api/cart/:session_id/clear", post(clear_cart))
        .route("/api/cart/:session_id/checkout", post(checkout_cart))
        // Account endpoints
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .with_state(state)
        // Add middleware layers (order matters - outer to inner)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(cors_middleware))
        .layer(middleware::from_fn(request_validation_middleware))
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
}

// =============================================================================
// CATALOG ENDPOINTS
// =============================================================================

/// List products, optionally filtered by category
#[instrument(name = "list_products", skip(state), fields(
    category = query.category.as_deref(),
))]
pub async fn list_products(
    State(state): State<ApiState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<ProductListResponse>, (StatusCode, Json<Value>)> {
    info!("Listing products");

    let category = match parse_category(query.category) {
        Ok(category) => category,
        Err(err) => {
            error!("Invalid query parameters: {}", err);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid query parameters",
                    "message": err,
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                })),
            ));
        }
    };

    match state
        .business
        .trace_catalog_request("list_products", state.catalog_service.list_products(category))
        .await
    {
        Ok(response) => {
            info!("Successfully listed {} products", response.total_count);
            Ok(Json(response))
        }
        Err(err) => {
            error!("Failed to list products: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Get a specific product by ID
#[instrument(name = "get_product", skip(state), fields(product_id = %product_id))]
pub async fn get_product(
    State(state): State<ApiState>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>, (StatusCode, Json<Value>)> {
    info!("Getting product with ID: {}", product_id);

    match state
        .business
        .trace_catalog_request("get_product", state.catalog_service.get_product(&product_id))
        .await
    {
        Ok(product) => {
            info!("Successfully retrieved product: {}", product.name);
            Ok(Json(product))
        }
        Err(err) => {
            error!("Failed to get product {}: {}", product_id, err);
            Err(service_error_to_response(err))
        }
    }
}

// =============================================================================
// CART ENDPOINTS
// =============================================================================

/// Get a session's cart
#[instrument(name = "get_cart", skip(state), fields(session_id = %session_id))]
pub async fn get_cart(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> Result<Json<CartResponse>, (StatusCode, Json<Value>)> {
    info!("Getting cart for session: {}", session_id);

    match state
        .business
        .trace_cart_operation(
            "get_cart",
            Some(&session_id),
            state.cart_service.get_cart(&session_id),
        )
        .await
    {
        Ok(cart) => {
            info!("Successfully retrieved cart with {} items", cart.item_count);
            Ok(Json(cart))
        }
        Err(err) => {
            error!("Failed to get cart for session {}: {}", session_id, err);
            Err(service_error_to_response(err))
        }
    }
}

/// Add an item to the cart
#[instrument(name = "add_cart_item", skip(state, request), fields(
    session_id = %session_id,
    product_id = %request.product_id,
    quantity = %request.quantity,
))]
pub async fn add_cart_item(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
    Json(request): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartResponse>), (StatusCode, Json<Value>)> {
    crate::info_with_trace!(
        "Adding item to cart for session: {}, product_id: {}, quantity: {}",
        session_id,
        request.product_id,
        request.quantity
    );

    match state
        .business
        .trace_cart_operation(
            "add_item",
            Some(&session_id),
            state.cart_service.add_item(&session_id, request),
        )
        .await
    {
        Ok(cart) => {
            crate::info_with_trace!("Successfully added item to cart");
            Ok((StatusCode::CREATED, Json(cart)))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to add item to cart: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Update the quantity on every cart line carrying a product
#[instrument(name = "update_cart_item", skip(state, request), fields(
    session_id = %session_id,
    product_id = %product_id,
    quantity = %request.quantity,
))]
pub async fn update_cart_item(
    State(state): State<ApiState>,
    Path((session_id, product_id)): Path<(String, String)>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartResponse>, (StatusCode, Json<Value>)> {
    crate::info_with_trace!(
        "Updating cart quantity for session: {}, product_id: {}, new_quantity: {}",
        session_id,
        product_id,
        request.quantity
    );

    match state
        .business
        .trace_cart_operation(
            "update_quantity",
            Some(&session_id),
            state
                .cart_service
                .update_quantity(&session_id, &product_id, request),
        )
        .await
    {
        Ok(cart) => {
            crate::info_with_trace!("Successfully updated cart quantity");
            Ok(Json(cart))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to update cart quantity: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Change the size recorded on every cart line carrying a product
#[instrument(name = "update_cart_item_size", skip(state, request), fields(
    session_id = %session_id,
    product_id = %product_id,
    size = %request.size,
))]
pub async fn update_cart_item_size(
    State(state): State<ApiState>,
    Path((session_id, product_id)): Path<(String, String)>,
    Json(request): Json<UpdateSizeRequest>,
) -> Result<Json<CartResponse>, (StatusCode, Json<Value>)> {
    crate::info_with_trace!(
        "Updating cart line size for session: {}, product_id: {}, size: {}",
        session_id,
        product_id,
        request.size
    );

    match state
        .business
        .trace_cart_operation(
            "update_size",
            Some(&session_id),
            state
                .cart_service
                .update_size(&session_id, &product_id, request),
        )
        .await
    {
        Ok(cart) => {
            crate::info_with_trace!("Successfully updated cart line size");
            Ok(Json(cart))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to update cart line size: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Remove a product from the cart
#[instrument(name = "remove_cart_item", skip(state), fields(
    session_id = %session_id,
    product_id = %product_id,
))]
pub async fn remove_cart_item(
    State(state): State<ApiState>,
    Path((session_id, product_id)): Path<(String, String)>,
) -> Result<Json<CartResponse>, (StatusCode, Json<Value>)> {
    crate::info_with_trace!(
        "Removing product from cart for session: {}, product_id: {}",
        session_id,
        product_id
    );

    match state
        .business
        .trace_cart_operation(
            "remove_item",
            Some(&session_id),
            state.cart_service.remove_item(&session_id, &product_id),
        )
        .await
    {
        Ok(cart) => {
            crate::info_with_trace!("Successfully removed product from cart");
            Ok(Json(cart))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to remove product from cart: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Clear all items from the cart
#[instrument(name = "clear_cart", skip(state), fields(
    session_id = %session_id,
))]
pub async fn clear_cart(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> Result<Json<CartResponse>, (StatusCode, Json<Value>)> {
    crate::info_with_trace!("Clearing cart for session: {}", session_id);

    match state
        .business
        .trace_cart_operation(
            "clear_cart",
            Some(&session_id),
            state.cart_service.clear_cart(&session_id),
        )
        .await
    {
        Ok(cart) => {
            crate::info_with_trace!("Successfully cleared cart");
            Ok(Json(cart))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to clear cart: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Erase the cart mirror entirely
#[instrument(name = "delete_cart", skip(state), fields(
    session_id = %session_id,
))]
pub async fn delete_cart(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    crate::info_with_trace!("Erasing cart for session: {}", session_id);

    match state
        .business
        .trace_cart_operation(
            "erase_cart",
            Some(&session_id),
            state.cart_service.erase_cart(&session_id),
        )
        .await
    {
        Ok(()) => {
            crate::info_with_trace!("Successfully erased cart");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => {
            crate::error_with_trace!("Failed to erase cart: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Checkout the cart and create an order
#[instrument(name = "checkout_cart", skip(state, request), fields(
    session_id = %session_id,
))]
pub async fn checkout_cart(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, (StatusCode, Json<Value>)> {
    info!("Processing checkout for session: {}", session_id);

    match state
        .business
        .trace_checkout(
            &session_id,
            state.checkout_service.checkout(&session_id, request),
        )
        .await
    {
        Ok(checkout_response) => {
            crate::info_with_trace!(
                "Checkout completed successfully for order: {}",
                checkout_response.order_id
            );
            Ok(Json(checkout_response))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to process checkout: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Parse an optional category query parameter
fn parse_category(category: Option<String>) -> Result<Option<ProductCategory>, String> {
    match category {
        Some(raw) => raw.parse().map(Some),
        None => Ok(None),
    }
}

/// Convert ServiceError to HTTP response
pub(super) fn service_error_to_response(err: ServiceError) -> (StatusCode, Json<Value>) {
    let (status, message) = match err {
        ServiceError::ProductNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::ValidationError { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::InvalidPayment { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::EmptyCart { .. } => (StatusCode::CONFLICT, err.to_string()),
        ServiceError::EmailTaken { .. } => (StatusCode::CONFLICT, err.to_string()),
        ServiceError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),
        ServiceError::Store { ref source } => match source {
            StoreError::InvalidKey { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal storage error".to_string(),
            ),
        },
        ServiceError::Configuration { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Configuration error".to_string(),
        ),
    };

    (
        status,
        Json(json!({
            "error": message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category(None).unwrap(), None);

        assert_eq!(
            parse_category(Some("grip-wrist-training".to_string())).unwrap(),
            Some(ProductCategory::GripWristTraining)
        );

        assert_eq!(
            parse_category(Some("competition-equipment".to_string())).unwrap(),
            Some(ProductCategory::CompetitionEquipment)
        );

        assert!(parse_category(Some("kettlebells".to_string())).is_err());
    }

    #[test]
    fn test_service_error_status_codes() {
        let (status, _) = service_error_to_response(ServiceError::ProductNotFound {
            id: "999".to_string(),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = service_error_to_response(ServiceError::ValidationError {
            message: "bad input".to_string(),
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = service_error_to_response(ServiceError::InvalidPayment {
            reason: "Invalid CVC".to_string(),
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = service_error_to_response(ServiceError::EmptyCart {
            session_id: "s1".to_string(),
        });
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = service_error_to_response(ServiceError::EmailTaken {
            email: "a@b.com".to_string(),
        });
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = service_error_to_response(ServiceError::InvalidCredentials);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_error_body_shape() {
        let (_, Json(body)) = service_error_to_response(ServiceError::ProductNotFound {
            id: "999".to_string(),
        });

        assert!(body.get("error").is_some());
        assert!(body.get("timestamp").is_some());
    }
}
