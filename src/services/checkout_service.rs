use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::models::{
    validate_session_id, CheckoutRequest, CheckoutResponse, OrderItem, OrderStatus,
    PaymentDetails, ServiceError, ServiceResult, ShippingDetails,
};
use crate::services::CartService;

/// Service for turning a cart into a confirmed order.
///
/// Payment is simulated: card details are format-checked and then dropped.
/// The cart is cleared exactly once, after every check has passed; a
/// rejected payment leaves the cart as it was.
pub struct CheckoutService {
    cart_service: Arc<CartService>,
}

impl CheckoutService {
    /// Create a new CheckoutService
    pub fn new(cart_service: Arc<CartService>) -> Self {
        Self { cart_service }
    }

    /// Place an order for everything in the session's cart
    #[instrument(skip(self, request), fields(session_id = %session_id))]
    pub async fn checkout(
        &self,
        session_id: &str,
        request: CheckoutRequest,
    ) -> ServiceResult<CheckoutResponse> {
        info!("Processing checkout");

        validate_session_id(session_id)?;

        let cart = self.cart_service.load_cart(session_id).await?;

        if cart.is_empty() {
            return Err(ServiceError::EmptyCart {
                session_id: session_id.to_string(),
            });
        }

        self.validate_shipping(&request.shipping)?;
        self.validate_payment(&request.payment)?;

        let items: Vec<OrderItem> = cart.items.iter().map(OrderItem::from).collect();
        let subtotal = cart.total_price();
        let shipping = Decimal::ZERO;

        let response = CheckoutResponse {
            order_id: Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            items,
            subtotal,
            shipping,
            total: subtotal + shipping,
            status: OrderStatus::Confirmed,
            created_at: Utc::now(),
        };

        // Clear only after validation, so a rejected payment keeps the cart
        self.cart_service.clear_cart(session_id).await?;

        info!(order_id = %response.order_id, "Checkout completed");
        Ok(response)
    }

    /// Require every shipping field to be present
    fn validate_shipping(&self, shipping: &ShippingDetails) -> ServiceResult<()> {
        let required = [
            (&shipping.first_name, "First name"),
            (&shipping.last_name, "Last name"),
            (&shipping.email, "Email"),
            (&shipping.phone, "Phone"),
            (&shipping.address, "Address"),
            (&shipping.city, "City"),
            (&shipping.postal_code, "Postal code"),
            (&shipping.country, "Country"),
        ];

        for (value, field) in required {
            if value.trim().is_empty() {
                return Err(ServiceError::ValidationError {
                    message: format!("{} is required", field),
                });
            }
        }

        Ok(())
    }

    /// Check the card number and CVC formats. Nothing is charged and the
    /// details are never stored.
    fn validate_payment(&self, payment: &PaymentDetails) -> ServiceResult<()> {
        let digits: String = payment
            .card_number
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        if digits.len() != 16 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ServiceError::InvalidPayment {
                reason: "Invalid card number".to_string(),
            });
        }

        if payment.cvc.len() != 3 {
            return Err(ServiceError::InvalidPayment {
                reason: "Invalid CVC".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cart, Product, ProductCategory, SizeVariant, StoreError};
    use crate::repositories::{CartStore, ProductCatalog, StaticCatalog};
    use async_trait::async_trait;
    use mockall::mock;
    use rust_decimal_macros::dec;

    mock! {
        TestCartStore {}

        #[async_trait]
        impl CartStore for TestCartStore {
            async fn read_cart(&self, session_id: &str) -> Result<Option<Cart>, StoreError>;
            async fn write_cart(&self, cart: &Cart) -> Result<(), StoreError>;
            async fn erase_cart(&self, session_id: &str) -> Result<(), StoreError>;
        }
    }

    fn test_product() -> Product {
        Product {
            id: "3".to_string(),
            name: "Ultra Grip Flat Handle".to_string(),
            description: "High-friction flat handle".to_string(),
            price: dec!(1299.99),
            image: "https://example.com/flat-handle.jpeg".to_string(),
            category: ProductCategory::GripWristTraining,
            brand: "BOERFORCE".to_string(),
            rating: Some(4.8),
            in_stock: true,
        }
    }

    fn filled_cart() -> Cart {
        let mut cart = Cart::new("session123".to_string());
        cart.add_line(test_product(), 2, SizeVariant::Standard);
        cart
    }

    fn valid_request() -> CheckoutRequest {
        CheckoutRequest {
            shipping: ShippingDetails {
                first_name: "Hannes".to_string(),
                last_name: "Steyn".to_string(),
                email: "hannes@example.com".to_string(),
                phone: "+27 82 555 0001".to_string(),
                address: "12 Voortrekker Rd".to_string(),
                city: "Bloemfontein".to_string(),
                postal_code: "9301".to_string(),
                country: "South Africa".to_string(),
            },
            payment: PaymentDetails {
                card_number: "4242 4242 4242 4242".to_string(),
                card_name: "H STEYN".to_string(),
                expiry: "12/27".to_string(),
                cvc: "123".to_string(),
            },
        }
    }

    fn service_with_store(store: MockTestCartStore) -> CheckoutService {
        let catalog: Arc<dyn ProductCatalog> = Arc::new(StaticCatalog::new());
        let cart_service = Arc::new(CartService::new(Arc::new(store), catalog));
        CheckoutService::new(cart_service)
    }

    #[tokio::test]
    async fn test_checkout_builds_order_and_clears_cart() {
        let mut mock_store = MockTestCartStore::new();
        let cart = filled_cart();

        // One read for the order snapshot, one inside the clear
        mock_store
            .expect_read_cart()
            .times(2)
            .returning(move |_| Ok(Some(cart.clone())));

        mock_store
            .expect_write_cart()
            .withf(|cart: &Cart| cart.items.is_empty())
            .times(1)
            .returning(|_| Ok(()));

        let service = service_with_store(mock_store);

        let response = service
            .checkout("session123", valid_request())
            .await
            .unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.subtotal, dec!(2599.98));
        assert_eq!(response.total, dec!(2599.98));
        assert_eq!(response.status, OrderStatus::Confirmed);
        assert!(!response.order_id.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_rejected() {
        let mut mock_store = MockTestCartStore::new();

        mock_store
            .expect_read_cart()
            .times(1)
            .returning(|_| Ok(None));

        let service = service_with_store(mock_store);

        let result = service.checkout("session123", valid_request()).await;

        assert!(matches!(result, Err(ServiceError::EmptyCart { .. })));
    }

    #[tokio::test]
    async fn test_invalid_card_number_keeps_cart() {
        let mut mock_store = MockTestCartStore::new();
        let cart = filled_cart();

        // No write expectation: a rejected payment must never flush
        mock_store
            .expect_read_cart()
            .times(1)
            .returning(move |_| Ok(Some(cart.clone())));

        let service = service_with_store(mock_store);

        let mut request = valid_request();
        request.payment.card_number = "4242".to_string();

        let result = service.checkout("session123", request).await;

        match result.unwrap_err() {
            ServiceError::InvalidPayment { reason } => assert_eq!(reason, "Invalid card number"),
            other => panic!("Expected InvalidPayment, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_numeric_card_rejected() {
        let mut mock_store = MockTestCartStore::new();
        let cart = filled_cart();

        mock_store
            .expect_read_cart()
            .times(1)
            .returning(move |_| Ok(Some(cart.clone())));

        let service = service_with_store(mock_store);

        let mut request = valid_request();
        request.payment.card_number = "4242 4242 4242 424x".to_string();

        assert!(matches!(
            service.checkout("session123", request).await,
            Err(ServiceError::InvalidPayment { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_cvc_keeps_cart() {
        let mut mock_store = MockTestCartStore::new();
        let cart = filled_cart();

        mock_store
            .expect_read_cart()
            .times(1)
            .returning(move |_| Ok(Some(cart.clone())));

        let service = service_with_store(mock_store);

        let mut request = valid_request();
        request.payment.cvc = "12".to_string();

        match service.checkout("session123", request).await.unwrap_err() {
            ServiceError::InvalidPayment { reason } => assert_eq!(reason, "Invalid CVC"),
            other => panic!("Expected InvalidPayment, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_shipping_field_rejected() {
        let mut mock_store = MockTestCartStore::new();
        let cart = filled_cart();

        mock_store
            .expect_read_cart()
            .times(1)
            .returning(move |_| Ok(Some(cart.clone())));

        let service = service_with_store(mock_store);

        let mut request = valid_request();
        request.shipping.city = "  ".to_string();

        match service.checkout("session123", request).await.unwrap_err() {
            ServiceError::ValidationError { message } => {
                assert_eq!(message, "City is required");
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }
}
